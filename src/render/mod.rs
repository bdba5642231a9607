//! Paint slides onto SDL surfaces.
//!
//! A [`Style`] is bound to a presentation when it is built. It is the only
//! thing that knows how a slide looks: the windowed viewer and the exporters
//! both go through [`Renderer::render_slide`].

pub mod caption;
pub mod fit;
pub mod fullbleed;
pub mod text;

use std::path::{Path, PathBuf};

use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{BlendMode, Canvas};
use sdl2::surface::Surface;
use sdl2::ttf::{Font, Sdl2TtfContext};
use tracing::trace;

use self::fit::Placement;
use self::text::{Align, Block, Run};
use crate::error::{Error, Result};
use crate::imageloader::SURFACE_FORMAT;
use crate::slideshow::Slide;

/// The accent colour used for emphasized text.
pub const ACCENT: Color = Color::RGB(0xBB, 0x00, 0x00);

/// Something able to paint a slide.
pub trait Renderer {
    /// Paint `slide` onto the context, which is `width` x `height` pixels.
    fn render_slide(
        &self,
        ctx: &mut RenderContext<'_>,
        width: u32,
        height: u32,
        slide: &Slide,
    ) -> Result<()>;
}

/// The visual styles a presentation can be drawn with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Style {
    /// A background image, covering the whole surface, and a caption box.
    Caption,
    /// Black background with centered text or letterboxed images. Relative
    /// image paths are resolved against `base_dir`.
    FullBleed { base_dir: PathBuf },
}

impl Style {
    pub fn full_bleed(base_dir: &Path) -> Self {
        Style::FullBleed {
            base_dir: base_dir.to_path_buf(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Style::Caption => "caption",
            Style::FullBleed { .. } => "full-bleed",
        }
    }

    /// Can this style draw `slide`?
    #[must_use]
    pub fn accepts(&self, slide: &Slide) -> bool {
        match self {
            Style::Caption => matches!(slide, Slide::Captioned { .. }),
            Style::FullBleed { .. } => !matches!(slide, Slide::Captioned { .. }),
        }
    }
}

impl Renderer for Style {
    fn render_slide(
        &self,
        ctx: &mut RenderContext<'_>,
        width: u32,
        height: u32,
        slide: &Slide,
    ) -> Result<()> {
        trace!("Rendering {:?} at {}x{}", slide, width, height);
        match (self, slide) {
            (Style::Caption, Slide::Captioned { image, caption }) => {
                caption::render(ctx, width, height, image, caption)
            }
            (Style::FullBleed { base_dir }, _) if self.accepts(slide) => {
                fullbleed::render(ctx, base_dir, width, height, slide)
            }
            _ => Err(Error::Unsupported(self.name())),
        }
    }
}

/// The font used for every text, loaded at whatever size a style asks for.
pub struct Fonts<'ttf> {
    ttf: &'ttf Sdl2TtfContext,
    path: PathBuf,
}

impl<'ttf> Fonts<'ttf> {
    /// Check that the font at `path` can be loaded.
    pub fn new(ttf: &'ttf Sdl2TtfContext, path: &Path) -> Result<Self> {
        let fonts = Fonts {
            ttf,
            path: path.to_path_buf(),
        };
        fonts.load(12)?;
        Ok(fonts)
    }

    pub fn load(&self, point_size: u16) -> Result<Font<'ttf, 'static>> {
        self.ttf
            .load_font(&self.path, point_size)
            .map_err(|reason| Error::Font {
                path: self.path.clone(),
                reason,
            })
    }
}

/// A software canvas over an in-memory surface, plus the drawing
/// primitives the styles need.
pub struct RenderContext<'a> {
    canvas: Canvas<Surface<'static>>,
    fonts: &'a Fonts<'a>,
}

impl<'a> RenderContext<'a> {
    /// A new, black, `width` x `height` surface to draw on.
    pub fn new(fonts: &'a Fonts<'a>, width: u32, height: u32) -> Result<Self> {
        let surface = Surface::new(width.max(1), height.max(1), SURFACE_FORMAT).map_err(Error::Sdl)?;
        let mut canvas = surface.into_canvas().map_err(Error::Sdl)?;
        canvas.set_draw_color(Color::BLACK);
        canvas.clear();
        Ok(RenderContext { canvas, fonts })
    }

    /// Give back the painted surface.
    #[must_use]
    pub fn finish(self) -> Surface<'static> {
        self.canvas.into_surface()
    }

    pub fn fonts(&self) -> &'a Fonts<'a> {
        self.fonts
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.canvas.surface().size()
    }

    /// Paint the whole surface with `color`.
    pub fn clear(&mut self, color: Color) {
        self.canvas.set_blend_mode(BlendMode::None);
        self.canvas.set_draw_color(color);
        self.canvas.clear();
    }

    /// Blend a rectangle of `color` over the surface.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<()> {
        self.canvas.set_blend_mode(BlendMode::Blend);
        self.canvas.set_draw_color(color);
        self.canvas.fill_rect(rect).map_err(Error::Sdl)
    }

    /// Scale and copy `image` to where `placement` says.
    pub fn draw_image(&mut self, image: &Surface<'_>, placement: &Placement) -> Result<()> {
        self.blit(image, placement.rect())
    }

    /// Lay out `block` starting at `top`.
    pub fn draw_block(&mut self, font: &Font<'_, '_>, block: &Block, align: Align, top: i32) -> Result<()> {
        let (surface_width, _) = self.size();
        for (line, y) in block.lines.iter().zip(block.line_tops(top)) {
            let mut x = match align {
                Align::Left { indent } => indent,
                Align::Center => centered(surface_width, line.width),
            };
            for measured in &line.runs {
                let Run { text, color } = &measured.run;
                let rendered = font.render(text).blended(*color)?;
                let (w, h) = rendered.size();
                self.blit(&rendered, Rect::new(x, y, w, h))?;
                x = x.saturating_add(i32::try_from(measured.width).unwrap_or(i32::MAX));
            }
        }
        Ok(())
    }

    /// Draw `lines` in the middle of the surface, using a font of
    /// `1/divisor` of its height and `height/spacing_divisor` between lines.
    pub fn draw_centered(&mut self, lines: Vec<Vec<Run>>, divisor: u32, spacing_divisor: u32) -> Result<()> {
        let (_, height) = self.size();
        let font = self.fonts.load(text::point_size(height, divisor))?;
        let block = Block::measure(&font, lines, height / spacing_divisor.max(1))?;
        let top = centered(height, block.height);
        self.draw_block(&font, &block, Align::Center, top)
    }

    fn blit(&mut self, surface: &Surface<'_>, dst: Rect) -> Result<()> {
        let creator = self.canvas.texture_creator();
        let texture = creator.create_texture_from_surface(surface)?;
        let res = self.canvas.copy(&texture, None, dst).map_err(Error::Sdl);
        // @safety The texture has been copied to the canvas and nothing else
        // refers to it.
        unsafe {
            texture.destroy();
        }
        res
    }
}

/// The offset that centers `inner` in `outer`. Negative when it overflows.
fn centered(outer: u32, inner: u32) -> i32 {
    let diff = i64::from(outer) - i64::from(inner);
    i32::try_from(diff / 2).unwrap_or(0)
}

/// Render one slide into a fresh surface.
pub fn render_to_surface(
    renderer: &impl Renderer,
    fonts: &Fonts<'_>,
    width: u32,
    height: u32,
    slide: &Slide,
) -> Result<Surface<'static>> {
    let mut ctx = RenderContext::new(fonts, width, height)?;
    renderer.render_slide(&mut ctx, width, height, slide)?;
    Ok(ctx.finish())
}

/// Render a frame telling the user what went wrong.
pub fn render_error(fonts: &Fonts<'_>, width: u32, height: u32, message: &str) -> Result<Surface<'static>> {
    let mut ctx = RenderContext::new(fonts, width, height)?;
    let lines = message.lines().map(|l| vec![Run::new(l, ACCENT)]).collect();
    ctx.draw_centered(lines, 30, 60)?;
    Ok(ctx.finish())
}

#[cfg(test)]
impl<'ttf> Fonts<'ttf> {
    /// Fonts that are only opened once some text gets drawn.
    pub(crate) fn unchecked(ttf: &'ttf Sdl2TtfContext, path: &Path) -> Self {
        Fonts {
            ttf,
            path: path.to_path_buf(),
        }
    }
}

/// Run `f` with SDL2_ttf initialised. Tests share FreeType, so they take
/// turns.
#[cfg(test)]
pub(crate) fn with_ttf<R>(f: impl FnOnce(&Sdl2TtfContext) -> R) -> R {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    let _guard = LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    let ttf = sdl2::ttf::init().expect("SDL2_ttf should initialise");
    f(&ttf)
}

/// A usable system font, if this machine has one.
#[cfg(test)]
pub(crate) fn system_fonts(ttf: &Sdl2TtfContext) -> Option<Fonts<'_>> {
    let path = crate::config::find_font(None, crate::config::FONT_CANDIDATES).ok()?;
    Fonts::new(ttf, &path).ok()
}

/// Save a `width` x `height` PNG of a single colour.
#[cfg(test)]
pub(crate) fn solid_png(path: &Path, width: u32, height: u32, rgb: [u8; 3]) {
    let [r, g, b] = rgb;
    image::RgbaImage::from_pixel(width, height, image::Rgba([r, g, b, 255]))
        .save(path)
        .expect("the test image should be written");
}
