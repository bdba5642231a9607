//! Load image files into SDL surfaces.
//!
//! Every surface handed out by this module is ARGB8888, whatever decoder
//! produced it, so the renderers can composite them without caring about
//! where the pixels came from.

use std::path::Path;

use sdl2::image::LoadSurface;
use sdl2::pixels::PixelFormatEnum;
use sdl2::surface::Surface;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// The layout of every surface produced or consumed by this crate.
pub const SURFACE_FORMAT: PixelFormatEnum = PixelFormatEnum::ARGB8888;

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}

/// Load the image at `path`.
///
/// PNG files go through SDL_image first, falling back to the `image` crate
/// if that fails. Everything else is decoded by the `image` crate directly.
pub fn load(path: &Path) -> Result<Surface<'static>> {
    load_with(path, load_native)
}

/// [`load`], with `native` standing in for SDL_image.
fn load_with<F>(path: &Path, native: F) -> Result<Surface<'static>>
where
    F: FnOnce(&Path) -> Result<Surface<'static>>,
{
    if is_png(path) {
        match native(path) {
            Ok(surface) => return Ok(surface),
            Err(e) => warn!(
                "Native decoder failed on {}, falling back: {}",
                path.display(),
                e
            ),
        }
    }
    load_general(path)
}

/// Decode through SDL_image.
fn load_native(path: &Path) -> Result<Surface<'static>> {
    let surface: Surface<'static> = Surface::from_file(path).map_err(Error::Sdl)?;
    debug!(
        "Decoded {} natively ({}x{})",
        path.display(),
        surface.width(),
        surface.height()
    );
    surface.convert_format(SURFACE_FORMAT).map_err(Error::Sdl)
}

/// Decode through the `image` crate.
fn load_general(path: &Path) -> Result<Surface<'static>> {
    let decode_error = |reason: String| Error::Decode {
        path: path.to_path_buf(),
        reason,
    };
    // Trust the content over the extension, a misnamed file still decodes.
    let image = image::ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| decode_error(e.to_string()))?
        .decode()
        .map_err(|e| decode_error(e.to_string()))?
        .into_rgba8();
    let (width, height) = image.dimensions();
    debug!("Decoded {} ({}x{})", path.display(), width, height);
    let mut pixels = image.into_raw();
    rgba_to_argb(&mut pixels);
    surface_from_argb(&pixels, width, height)
}

/// Repack RGBA bytes, in place, into native endian ARGB8888 words.
///
/// On little endian hosts this swaps the R and B bytes of every pixel.
pub fn rgba_to_argb(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(4) {
        let [r, g, b, a] = [px[0], px[1], px[2], px[3]];
        let word = u32::from_be_bytes([a, r, g, b]);
        px.copy_from_slice(&word.to_ne_bytes());
    }
}

/// Repack native endian ARGB8888 words, in place, into RGBA bytes.
pub fn argb_to_rgba(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(4) {
        let word = u32::from_ne_bytes([px[0], px[1], px[2], px[3]]);
        let [a, r, g, b] = word.to_be_bytes();
        px.copy_from_slice(&[r, g, b, a]);
    }
}

/// Build an ARGB8888 surface out of tightly packed ARGB8888 pixels.
pub fn surface_from_argb(pixels: &[u8], width: u32, height: u32) -> Result<Surface<'static>> {
    let mut surface = Surface::new(width, height, SURFACE_FORMAT).map_err(Error::Sdl)?;
    let row = width as usize * 4;
    let pitch = surface.pitch() as usize;
    surface.with_lock_mut(|buf| {
        for (dst, src) in buf.chunks_mut(pitch).zip(pixels.chunks_exact(row)) {
            dst[..row].copy_from_slice(src);
        }
    });
    Ok(surface)
}

/// Copy an ARGB8888 surface into an RGBA image, as the `image` crate
/// expects it.
pub fn surface_to_rgba(surface: &Surface<'_>) -> Result<image::RgbaImage> {
    if surface.pixel_format_enum() != SURFACE_FORMAT {
        return Err(Error::sdl(format!(
            "expected a {:?} surface, got {:?}",
            SURFACE_FORMAT,
            surface.pixel_format_enum()
        )));
    }
    let (width, height) = surface.size();
    let row = width as usize * 4;
    let pitch = surface.pitch() as usize;
    let mut pixels = Vec::with_capacity(row * height as usize);
    surface.with_lock(|buf| {
        for line in buf.chunks(pitch).take(height as usize) {
            pixels.extend_from_slice(&line[..row]);
        }
    });
    argb_to_rgba(&mut pixels);
    image::RgbaImage::from_raw(width, height, pixels)
        .ok_or_else(|| Error::sdl("surface buffer is smaller than its size"))
}

#[cfg(test)]
mod test {
    use super::*;
    use std::cell::Cell;
    use tempfile::TempDir;

    #[test]
    fn test_repack_word_layout() {
        let mut px = vec![0x11, 0x22, 0x33, 0x44];
        rgba_to_argb(&mut px);
        let word = u32::from_ne_bytes([px[0], px[1], px[2], px[3]]);
        assert_eq!(word, 0x4411_2233);
        argb_to_rgba(&mut px);
        assert_eq!(px, vec![0x11, 0x22, 0x33, 0x44]);
    }

    #[cfg(target_endian = "little")]
    #[test]
    fn test_repack_swaps_red_and_blue() {
        let mut px = vec![255, 0, 10, 128, 1, 2, 3, 4];
        rgba_to_argb(&mut px);
        assert_eq!(px, vec![10, 0, 255, 128, 3, 2, 1, 4]);
    }

    #[test]
    fn test_is_png() {
        assert!(is_png(Path::new("a/b.PNG")));
        assert!(is_png(Path::new("b.png")));
        assert!(!is_png(Path::new("b.jpg")));
        assert!(!is_png(Path::new("png")));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let r = load(&tmp.path().join("nothing.jpg"));
        assert!(matches!(r, Err(Error::Decode { .. })));
    }

    #[test]
    fn test_garbage_png_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        assert!(load(&path).is_err());
    }

    #[test]
    fn test_general_decoder_pixels() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pixels.bmp");
        let mut img = image::RgbaImage::new(3, 2);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        img.put_pixel(2, 1, image::Rgba([0, 0, 255, 255]));
        img.save(&path).unwrap();

        let surface = load(&path).unwrap();
        assert_eq!(surface.size(), (3, 2));
        assert_eq!(surface.pixel_format_enum(), SURFACE_FORMAT);

        let back = surface_to_rgba(&surface).unwrap();
        assert_eq!(back.get_pixel(0, 0), &image::Rgba([255, 0, 0, 255]));
        assert_eq!(back.get_pixel(2, 1), &image::Rgba([0, 0, 255, 255]));
    }

    fn failing_native(calls: &Cell<usize>) -> impl FnOnce(&Path) -> Result<Surface<'static>> + '_ {
        move |_| {
            calls.set(calls.get() + 1);
            Err(Error::sdl("unsupported image format"))
        }
    }

    #[test]
    fn test_png_falls_back_when_native_fails() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("green.png");
        image::RgbaImage::from_pixel(4, 3, image::Rgba([0, 255, 0, 255]))
            .save(&path)
            .unwrap();

        let calls = Cell::new(0);
        let surface = load_with(&path, failing_native(&calls)).unwrap();
        assert_eq!(calls.get(), 1, "the native decoder goes first");
        assert_eq!(surface.size(), (4, 3));
        assert_eq!(surface.pixel_format_enum(), SURFACE_FORMAT);
        let back = surface_to_rgba(&surface).unwrap();
        assert_eq!(back.get_pixel(3, 2), &image::Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn test_other_formats_skip_native() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("photo.jpg");
        image::RgbImage::from_pixel(8, 8, image::Rgb([200, 200, 200]))
            .save(&path)
            .unwrap();

        let calls = Cell::new(0);
        let surface = load_with(&path, failing_native(&calls)).unwrap();
        assert_eq!(calls.get(), 0);
        assert_eq!(surface.size(), (8, 8));
    }

    #[test]
    fn test_both_decoders_failing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let calls = Cell::new(0);
        let r = load_with(&path, failing_native(&calls));
        assert_eq!(calls.get(), 1);
        assert!(matches!(r, Err(Error::Decode { .. })));
    }
}
