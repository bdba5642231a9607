//! How an image is scaled and positioned inside a viewport.

use sdl2::rect::Rect;

/// The two ways an image can be fitted into the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    /// Scale to fill, cropping the overflow. Never leaves a margin.
    Cover,
    /// Scale to fit, letterboxing. Never crops.
    Contain,
}

/// Where the scaled image lands. The translation may be negative with
/// [`Fit::Cover`], meaning the image is cropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub scale: f64,
    pub tx: f64,
    pub ty: f64,
    pub width: f64,
    pub height: f64,
}

impl Placement {
    /// Compute the placement of an `image` sized image in a `viewport`.
    ///
    /// Both sizes are `(width, height)`; a zero sized image gets a scale of 0
    /// and is placed in the middle of the viewport.
    #[must_use]
    pub fn new(fit: Fit, viewport: (u32, u32), image: (u32, u32)) -> Placement {
        let (vw, vh) = (f64::from(viewport.0), f64::from(viewport.1));
        let (iw, ih) = (f64::from(image.0), f64::from(image.1));
        let scale = if iw == 0.0 || ih == 0.0 {
            0.0
        } else {
            let (sx, sy) = (vw / iw, vh / ih);
            match fit {
                Fit::Cover => sx.max(sy),
                Fit::Contain => sx.min(sy),
            }
        };
        let (width, height) = (scale * iw, scale * ih);
        Placement {
            scale,
            tx: (vw - width) / 2.,
            ty: (vh - height) / 2.,
            width,
            height,
        }
    }

    /// The destination rectangle, in whole pixels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.tx.round() as i32,
            self.ty.round() as i32,
            (self.width.round() as u32).max(1),
            (self.height.round() as u32).max(1),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const EPS: f64 = 1e-9;

    fn sizes() -> Vec<(u32, u32)> {
        vec![
            (1, 1),
            (100, 200),
            (400, 200),
            (800, 600),
            (1024, 768),
            (1920, 1080),
            (333, 777),
            (4000, 3),
        ]
    }

    #[test]
    fn test_portrait_in_landscape() {
        let cover = Placement::new(Fit::Cover, (400, 200), (100, 200));
        assert!((cover.scale - 4.0).abs() < EPS);
        let contain = Placement::new(Fit::Contain, (400, 200), (100, 200));
        assert!((contain.scale - 1.0).abs() < EPS);
        assert!((contain.tx - 150.0).abs() < EPS);
        assert!(contain.ty.abs() < EPS);
        // Cover: 400x800, cropped vertically by 300 on each side.
        assert!(cover.tx.abs() < EPS);
        assert!((cover.ty + 300.0).abs() < EPS);
    }

    #[test]
    fn test_cover_never_leaves_gaps() {
        for viewport in sizes() {
            for image in sizes() {
                let p = Placement::new(Fit::Cover, viewport, image);
                let expected = (f64::from(viewport.0) / f64::from(image.0))
                    .max(f64::from(viewport.1) / f64::from(image.1));
                assert!((p.scale - expected).abs() < EPS);
                assert!(p.width + EPS >= f64::from(viewport.0));
                assert!(p.height + EPS >= f64::from(viewport.1));
                // Overflow is split evenly on both sides.
                let right = f64::from(viewport.0) - (p.tx + p.width);
                let bottom = f64::from(viewport.1) - (p.ty + p.height);
                assert!((p.tx - right).abs() < 1e-6);
                assert!((p.ty - bottom).abs() < 1e-6);
                assert!(p.tx <= EPS && p.ty <= EPS);
            }
        }
    }

    #[test]
    fn test_contain_always_fits() {
        for viewport in sizes() {
            for image in sizes() {
                let p = Placement::new(Fit::Contain, viewport, image);
                let expected = (f64::from(viewport.0) / f64::from(image.0))
                    .min(f64::from(viewport.1) / f64::from(image.1));
                assert!((p.scale - expected).abs() < EPS);
                assert!(p.width <= f64::from(viewport.0) + 1e-6);
                assert!(p.height <= f64::from(viewport.1) + 1e-6);
                assert!(p.tx >= -EPS && p.ty >= -EPS);
                let right = f64::from(viewport.0) - (p.tx + p.width);
                let bottom = f64::from(viewport.1) - (p.ty + p.height);
                assert!((p.tx - right).abs() < 1e-6);
                assert!((p.ty - bottom).abs() < 1e-6);
                // One axis is filled exactly.
                assert!(
                    (p.width - f64::from(viewport.0)).abs() < 1e-6
                        || (p.height - f64::from(viewport.1)).abs() < 1e-6
                );
            }
        }
    }

    #[test]
    fn test_empty_image() {
        let p = Placement::new(Fit::Contain, (800, 600), (0, 10));
        assert!(p.scale.abs() < EPS);
        assert!((p.tx - 400.0).abs() < EPS);
        assert!((p.ty - 300.0).abs() < EPS);
    }

    #[test]
    fn test_rect_rounding() {
        let p = Placement::new(Fit::Cover, (400, 200), (100, 200));
        assert_eq!(p.rect(), Rect::new(0, -300, 400, 800));
    }
}
