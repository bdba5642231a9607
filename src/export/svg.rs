//! SVG pages wrapping the rendered slide as an embedded PNG.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{ImageFormat, RgbaImage};

use crate::error::Result;

/// An SVG document of the image's size showing `image`.
pub fn document(image: &RgbaImage) -> Result<String> {
    let mut png = Cursor::new(vec![]);
    image.write_to(&mut png, ImageFormat::Png)?;
    let data = STANDARD.encode(png.into_inner());
    let (w, h) = image.dimensions();
    Ok(format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
  <image x="0" y="0" width="{w}" height="{h}" xlink:href="data:image/png;base64,{data}"/>
</svg>
"#
    ))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_embedded_png() {
        let img = RgbaImage::from_pixel(5, 3, image::Rgba([1, 2, 3, 255]));
        let svg = document(&img).unwrap();
        assert!(svg.contains(r#"width="5" height="3" viewBox="0 0 5 3""#));

        let data = svg
            .split("base64,")
            .nth(1)
            .and_then(|rest| rest.split('"').next())
            .unwrap();
        let png = STANDARD.decode(data).unwrap();
        let back = image::load_from_memory(&png).unwrap().into_rgba8();
        assert_eq!(back, img);
    }
}
