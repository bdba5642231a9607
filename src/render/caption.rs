//! The caption style: a background image zoomed to cover the surface, and a
//! caption in a translucent box near the top left corner.

use std::path::Path;

use sdl2::pixels::Color;
use sdl2::rect::Rect;

use super::fit::{Fit, Placement};
use super::text::{self, Align, Block, Run};
use super::RenderContext;
use crate::error::Result;
use crate::imageloader;

/// The translucent light grey behind the caption.
pub const BOX_COLOR: Color = Color::RGBA(230, 230, 230, 128);

/// Caption geometry, all relative to the surface size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptionLayout {
    pub font_size: u16,
    pub indent: i32,
    pub spacing: u32,
    pub box_top: i32,
    pub text_top: i32,
    /// Added to the text size to get the box size.
    pub box_margin: (u32, u32),
}

impl CaptionLayout {
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(width: u32, height: u32) -> Self {
        let (w, h) = (f64::from(width), f64::from(height));
        CaptionLayout {
            font_size: text::point_size(height, 12),
            indent: (0.03 * w) as i32,
            spacing: height / 60,
            box_top: (0.06 * h) as i32,
            // Box top plus half of the vertical margin.
            text_top: (0.085 * h) as i32,
            box_margin: ((0.06 * w) as u32, (0.05 * h) as u32),
        }
    }

    /// The box behind a text block of `text_width` x `text_height`.
    #[must_use]
    pub fn box_rect(&self, text_width: u32, text_height: u32) -> Rect {
        Rect::new(
            0,
            self.box_top,
            text_width + self.box_margin.0,
            text_height + self.box_margin.1,
        )
    }
}

pub(super) fn render(
    ctx: &mut RenderContext<'_>,
    width: u32,
    height: u32,
    image: &Path,
    caption: &str,
) -> Result<()> {
    let image = imageloader::load(image)?;
    ctx.clear(Color::BLACK);
    let placement = Placement::new(Fit::Cover, (width, height), image.size());
    ctx.draw_image(&image, &placement)?;

    if caption.trim().is_empty() {
        return Ok(());
    }
    let layout = CaptionLayout::new(width, height);
    let font = ctx.fonts().load(layout.font_size)?;
    let lines = caption
        .lines()
        .map(|line| vec![Run::new(line, Color::BLACK)])
        .collect();
    let block = Block::measure(&font, lines, layout.spacing)?;
    ctx.fill_rect(layout.box_rect(block.width, block.height), BOX_COLOR)?;
    ctx.draw_block(
        &font,
        &block,
        Align::Left {
            indent: layout.indent,
        },
        layout.text_top,
    )
}
