//! Render a whole presentation to files, one slide after the other.

pub mod pdf;
pub mod svg;

use std::ffi::OsString;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use sdl2::image::SaveSurface;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::imageloader;
use crate::render::{self, Fonts};
use crate::slideshow::Presentation;

/// The supported output formats.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Png,
    Jpeg,
    Bmp,
    Svg,
    /// A single, multi-page file.
    Pdf,
}

impl Format {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Format::Png => "png",
            Format::Jpeg => "jpg",
            Format::Bmp => "bmp",
            Format::Svg => "svg",
            Format::Pdf => "pdf",
        }
    }

    /// The page size used when none is given.
    #[must_use]
    pub fn default_geometry(self) -> (u32, u32) {
        match self {
            Format::Svg => (640, 480),
            _ => (1024, 768),
        }
    }
}

/// `<basename>-<index>.<extension>`
#[must_use]
pub fn slide_path(basename: &Path, index: usize, extension: &str) -> PathBuf {
    let mut name = OsString::from(basename.as_os_str());
    name.push(format!("-{index}.{extension}"));
    PathBuf::from(name)
}

/// `<basename>.<extension>`
#[must_use]
pub fn document_path(basename: &Path, extension: &str) -> PathBuf {
    let mut name = OsString::from(basename.as_os_str());
    name.push(format!(".{extension}"));
    PathBuf::from(name)
}

/// Batch renders a presentation.
pub struct Exporter<'a> {
    presentation: &'a Presentation,
    fonts: &'a Fonts<'a>,
    basename: PathBuf,
    geometry: (u32, u32),
}

impl<'a> Exporter<'a> {
    pub fn new(presentation: &'a Presentation, fonts: &'a Fonts<'a>, basename: &Path, geometry: (u32, u32)) -> Self {
        Exporter {
            presentation,
            fonts,
            basename: basename.to_path_buf(),
            geometry,
        }
    }

    /// Render every slide to `format`, returning the files written.
    pub fn export(&self, format: Format) -> Result<Vec<PathBuf>> {
        let (width, height) = self.geometry;
        info!(
            "Exporting {} slides as {:?} at {}x{}",
            self.presentation.len(),
            format,
            width,
            height
        );
        let style = self.presentation.style();
        let mut written = vec![];
        let mut document = pdf::Document::new(width, height);

        for (index, slide) in self.presentation.slides().iter().enumerate() {
            let surface = render::render_to_surface(style, self.fonts, width, height, slide)?;
            let path = slide_path(&self.basename, index, format.extension());
            match format {
                Format::Png => surface.save(&path).map_err(Error::Export)?,
                Format::Bmp => surface.save_bmp(&path).map_err(Error::Export)?,
                Format::Jpeg => {
                    let rgb = image::DynamicImage::ImageRgba8(imageloader::surface_to_rgba(&surface)?).into_rgb8();
                    rgb.save_with_format(&path, image::ImageFormat::Jpeg)?;
                }
                Format::Svg => std::fs::write(&path, svg::document(&imageloader::surface_to_rgba(&surface)?)?)?,
                Format::Pdf => {
                    document.add_page(&imageloader::surface_to_rgba(&surface)?)?;
                    continue;
                }
            }
            debug!("Wrote {}", path.display());
            written.push(path);
        }

        if format == Format::Pdf {
            let path = document_path(&self.basename, format.extension());
            let mut out = BufWriter::new(File::create(&path)?);
            document.write_to(&mut out)?;
            debug!("Wrote {} ({} pages)", path.display(), document.page_count());
            written.push(path);
        }
        Ok(written)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::render::{solid_png, with_ttf, Style};
    use crate::slideshow::Slide;
    use tempfile::TempDir;

    /// Two full-bleed image slides, red then blue, in `dir`.
    fn two_slides(dir: &Path) -> Presentation {
        solid_png(&dir.join("red.png"), 40, 30, [255, 0, 0]);
        solid_png(&dir.join("blue.png"), 40, 30, [0, 0, 255]);
        let slides = vec![Slide::Image("red.png".into()), Slide::Image("blue.png".into())];
        Presentation::new(slides, Style::full_bleed(dir)).unwrap()
    }

    fn export(dir: &Path, format: Format) -> Vec<PathBuf> {
        let presentation = two_slides(dir);
        with_ttf(|ttf| {
            let fonts = Fonts::unchecked(ttf, Path::new("unused.ttf"));
            Exporter::new(&presentation, &fonts, &dir.join("deck"), (80, 60))
                .export(format)
                .unwrap()
        })
    }

    #[test]
    fn test_paths() {
        assert_eq!(
            slide_path(Path::new("out/deck"), 3, "png"),
            PathBuf::from("out/deck-3.png")
        );
        assert_eq!(
            slide_path(Path::new("pngfile"), 0, Format::Jpeg.extension()),
            PathBuf::from("pngfile-0.jpg")
        );
        assert_eq!(
            document_path(Path::new("out/deck"), "pdf"),
            PathBuf::from("out/deck.pdf")
        );
    }

    #[test]
    fn test_default_geometry() {
        assert_eq!(Format::Svg.default_geometry(), (640, 480));
        assert_eq!(Format::Pdf.default_geometry(), (1024, 768));
        assert_eq!(Format::Png.default_geometry(), (1024, 768));
    }

    #[test]
    fn test_export_png() {
        let tmp = TempDir::new().unwrap();
        let written = export(tmp.path(), Format::Png);
        assert_eq!(
            written,
            vec![tmp.path().join("deck-0.png"), tmp.path().join("deck-1.png")]
        );
        let first = image::open(&written[0]).unwrap().into_rgba8();
        let second = image::open(&written[1]).unwrap().into_rgba8();
        assert_eq!(first.dimensions(), (80, 60));
        assert_eq!(first.get_pixel(40, 30).0, [255, 0, 0, 255]);
        assert_eq!(second.get_pixel(40, 30).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_export_jpeg_and_bmp() {
        let tmp = TempDir::new().unwrap();
        let written = export(tmp.path(), Format::Jpeg);
        assert_eq!(written[1], tmp.path().join("deck-1.jpg"));
        let second = image::open(&written[1]).unwrap().into_rgb8();
        let [r, _, b] = second.get_pixel(40, 30).0;
        assert!(b > 200 && r < 50);

        let written = export(tmp.path(), Format::Bmp);
        assert_eq!(written[0], tmp.path().join("deck-0.bmp"));
        assert!(written.iter().all(|p| p.is_file()));
    }

    #[test]
    fn test_export_pdf_is_one_file() {
        let tmp = TempDir::new().unwrap();
        let written = export(tmp.path(), Format::Pdf);
        assert_eq!(written, vec![tmp.path().join("deck.pdf")]);
        assert!(!tmp.path().join("deck-0.pdf").exists());
        let bytes = std::fs::read(&written[0]).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(bytes.windows(8).any(|w| w == b"/Count 2"));
    }

    #[test]
    fn test_export_svg() {
        let tmp = TempDir::new().unwrap();
        let written = export(tmp.path(), Format::Svg);
        assert_eq!(written.len(), 2);
        let svg = std::fs::read_to_string(&written[0]).unwrap();
        assert!(svg.contains(r#"width="80" height="60""#));
    }
}
