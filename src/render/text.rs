//! Measure and lay out multi-line, multi-colour text.

use sdl2::pixels::Color;
use sdl2::ttf::Font;

use crate::error::Result;

/// A piece of text drawn with a single colour.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub color: Color,
}

impl Run {
    pub fn new(text: impl Into<String>, color: Color) -> Self {
        Run {
            text: text.into(),
            color,
        }
    }
}

/// How each line is placed horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// Every line starts `indent` pixels from the left edge.
    Left { indent: i32 },
    /// Every line is centered in the surface.
    Center,
}

#[derive(Debug)]
pub(super) struct MeasuredRun {
    pub run: Run,
    pub width: u32,
}

#[derive(Debug)]
pub(super) struct MeasuredLine {
    pub runs: Vec<MeasuredRun>,
    pub width: u32,
}

/// A laid out paragraph: lines measured with a given font.
#[derive(Debug)]
pub struct Block {
    pub(super) lines: Vec<MeasuredLine>,
    pub(super) line_height: u32,
    pub(super) spacing: u32,
    /// The width of the widest line.
    pub width: u32,
    /// The height of all lines, spacing included.
    pub height: u32,
}

impl Block {
    /// Measure `lines` with `font`, separating lines by `spacing` pixels.
    pub fn measure(font: &Font<'_, '_>, lines: Vec<Vec<Run>>, spacing: u32) -> Result<Block> {
        let line_height = u32::try_from(font.height()).unwrap_or(0);
        let mut measured = Vec::with_capacity(lines.len());
        for runs in lines {
            let mut width = 0;
            let mut line = Vec::with_capacity(runs.len());
            for run in runs.into_iter().filter(|r| !r.text.is_empty()) {
                let (w, _) = font.size_of(&run.text)?;
                width += w;
                line.push(MeasuredRun { run, width: w });
            }
            measured.push(MeasuredLine { runs: line, width });
        }
        let width = measured.iter().map(|l| l.width).max().unwrap_or(0);
        Ok(Block {
            width,
            height: block_height(measured.len(), line_height, spacing),
            lines: measured,
            line_height,
            spacing,
        })
    }

    /// Where each line starts vertically, given the top of the block.
    pub(super) fn line_tops(&self, top: i32) -> impl Iterator<Item = i32> + '_ {
        let step = i32::try_from(self.line_height + self.spacing).unwrap_or(i32::MAX);
        (0..).map(move |idx: i32| top.saturating_add(idx.saturating_mul(step)))
    }
}

fn block_height(lines: usize, line_height: u32, spacing: u32) -> u32 {
    let lines = u32::try_from(lines).unwrap_or(u32::MAX);
    match lines {
        0 => 0,
        n => n * line_height + (n - 1) * spacing,
    }
}

/// The point size for a font that is `1/divisor` of the surface height.
#[must_use]
pub fn point_size(height: u32, divisor: u32) -> u16 {
    u16::try_from(height / divisor.max(1))
        .unwrap_or(u16::MAX)
        .max(1)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_block_height() {
        assert_eq!(block_height(0, 20, 5), 0);
        assert_eq!(block_height(1, 20, 5), 20);
        assert_eq!(block_height(3, 20, 5), 70);
    }

    #[test]
    fn test_point_size() {
        assert_eq!(point_size(600, 12), 50);
        assert_eq!(point_size(600, 20), 30);
        assert_eq!(point_size(5, 12), 1);
        assert_eq!(point_size(u32::MAX, 1), u16::MAX);
    }
}
