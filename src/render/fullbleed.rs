//! The full-bleed style: everything on black. Images are letterboxed so
//! they are never cropped, text is centered on the surface.

use std::path::{Path, PathBuf};

use sdl2::pixels::Color;

use super::fit::{Fit, Placement};
use super::text::Run;
use super::{RenderContext, ACCENT};
use crate::error::{Error, Result};
use crate::imageloader;
use crate::slideshow::{Markup, Slide};

/// Font size, as a fraction of the height.
const FONT_DIVISOR: u32 = 20;
/// Space between lines, as a fraction of the height.
const SPACING_DIVISOR: u32 = 50;

/// Resolve relative image paths against the presentation's folder.
#[must_use]
pub fn resolve(base_dir: &Path, image: &Path) -> PathBuf {
    if image.is_absolute() {
        image.to_path_buf()
    } else {
        base_dir.join(image)
    }
}

/// Turn markup into coloured runs.
#[must_use]
pub fn markup_runs(markup: &Markup) -> Vec<Vec<Run>> {
    markup
        .lines
        .iter()
        .map(|spans| {
            spans
                .iter()
                .map(|span| Run::new(span.text.as_str(), if span.emphasis { ACCENT } else { Color::WHITE }))
                .collect()
        })
        .collect()
}

/// A statement is drawn in a single colour, without any markup.
#[must_use]
pub fn statement_runs(text: &str, emphasis: bool) -> Vec<Vec<Run>> {
    let color = if emphasis { ACCENT } else { Color::WHITE };
    text.lines().map(|line| vec![Run::new(line, color)]).collect()
}

pub(super) fn render(
    ctx: &mut RenderContext<'_>,
    base_dir: &Path,
    width: u32,
    height: u32,
    slide: &Slide,
) -> Result<()> {
    ctx.clear(Color::BLACK);
    match slide {
        Slide::Image(path) => {
            let image = imageloader::load(&resolve(base_dir, path))?;
            let placement = Placement::new(Fit::Contain, (width, height), image.size());
            ctx.draw_image(&image, &placement)
        }
        Slide::Markup(markup) => ctx.draw_centered(markup_runs(markup), FONT_DIVISOR, SPACING_DIVISOR),
        Slide::Statement { text, emphasis } => {
            ctx.draw_centered(statement_runs(text, *emphasis), FONT_DIVISOR, SPACING_DIVISOR)
        }
        Slide::Captioned { .. } => Err(Error::Unsupported("full-bleed")),
    }
}
