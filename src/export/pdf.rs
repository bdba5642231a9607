//! A minimal PDF writer: one full page JPEG image per page.

use std::fmt::Write as _;
use std::io::Write;

use image::codecs::jpeg::JpegEncoder;
use image::RgbaImage;

use crate::error::Result;

const JPEG_QUALITY: u8 = 90;

struct Page {
    jpeg: Vec<u8>,
    width: u32,
    height: u32,
}

/// A PDF document whose pages are all `width` x `height` points.
pub struct Document {
    width: u32,
    height: u32,
    pages: Vec<Page>,
}

impl Document {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Document {
            width,
            height,
            pages: vec![],
        }
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Append a page showing `image`, stretched over the whole page.
    pub fn add_page(&mut self, image: &RgbaImage) -> Result<()> {
        let rgb = image::DynamicImage::ImageRgba8(image.clone()).into_rgb8();
        let mut jpeg = vec![];
        rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY))?;
        self.pages.push(Page {
            jpeg,
            width: image.width(),
            height: image.height(),
        });
        Ok(())
    }

    /// Serialize the document.
    pub fn write_to(&self, out: &mut impl Write) -> Result<()> {
        let mut buf = ObjectWriter::default();
        buf.raw(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

        // 1: catalog, 2: page tree, then page, content and image per page.
        let page_id = |idx: usize| 3 + 3 * idx;
        buf.object(1, "<< /Type /Catalog /Pages 2 0 R >>", None);
        let kids = (0..self.pages.len()).fold(String::new(), |mut s, idx| {
            let _ = write!(s, "{} 0 R ", page_id(idx));
            s
        });
        buf.object(
            2,
            &format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kids.trim_end(),
                self.pages.len()
            ),
            None,
        );

        let (w, h) = (self.width, self.height);
        for (idx, page) in self.pages.iter().enumerate() {
            let id = page_id(idx);
            buf.object(
                id,
                &format!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {w} {h}] \
                     /Resources << /XObject << /Im0 {} 0 R >> >> /Contents {} 0 R >>",
                    id + 2,
                    id + 1
                ),
                None,
            );
            let content = format!("q {w} 0 0 {h} 0 0 cm /Im0 Do Q");
            buf.object(
                id + 1,
                &format!("<< /Length {} >>", content.len()),
                Some(content.as_bytes()),
            );
            buf.object(
                id + 2,
                &format!(
                    "<< /Type /XObject /Subtype /Image /Width {} /Height {} \
                     /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /DCTDecode /Length {} >>",
                    page.width,
                    page.height,
                    page.jpeg.len()
                ),
                Some(&page.jpeg),
            );
        }

        let bytes = buf.finish();
        out.write_all(&bytes)?;
        Ok(())
    }
}

/// Accumulates objects and remembers where each one starts.
#[derive(Default)]
struct ObjectWriter {
    bytes: Vec<u8>,
    offsets: Vec<(usize, usize)>,
}

impl ObjectWriter {
    fn raw(&mut self, data: &[u8]) {
        self.bytes.extend_from_slice(data);
    }

    fn object(&mut self, id: usize, dict: &str, stream: Option<&[u8]>) {
        self.offsets.push((id, self.bytes.len()));
        self.raw(format!("{id} 0 obj\n{dict}\n").as_bytes());
        if let Some(stream) = stream {
            self.raw(b"stream\n");
            self.raw(stream);
            self.raw(b"\nendstream\n");
        }
        self.raw(b"endobj\n");
    }

    /// Append the cross-reference table and the trailer.
    fn finish(mut self) -> Vec<u8> {
        self.offsets.sort_unstable();
        let size = self.offsets.len() + 1;
        let xref = self.bytes.len();
        let mut table = format!("xref\n0 {size}\n0000000000 65535 f \n");
        for (_, offset) in &self.offsets {
            let _ = writeln!(table, "{offset:010} 00000 n ");
        }
        let _ = write!(
            table,
            "trailer\n<< /Size {size} /Root 1 0 R >>\nstartxref\n{xref}\n%%EOF\n"
        );
        self.raw(table.as_bytes());
        self.bytes
    }
}
