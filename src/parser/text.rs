/*! The plain text slide format.

Every line starting with `#` is a comment.

Slides are separated by one or more blank lines.

A slide starting with `img::` shows the image whose path follows, relative
paths being resolved against the folder of the slide file.

Any other slide is text: `*` toggles the emphasis, and an emphasis left open
is closed at the end of its slide.

```text
# A comment
Hello *world*

img::pictures/cat.jpg
```
*/
use std::path::Path;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::slideshow::{Markup, Slide};

/// The marker of an image slide.
pub const IMAGE_DIRECTIVE: &str = "img::";

/// The raw text of a slide, and the line it starts at (1-based).
#[derive(Debug, PartialEq)]
struct Chunk {
    line: usize,
    text: String,
}

/// Split the input in slide chunks, dropping comments.
fn chunks(input: &str) -> Vec<Chunk> {
    let mut chunks = vec![];
    let mut current: Option<Chunk> = None;
    for (idx, line) in input.lines().enumerate() {
        if line.starts_with('#') {
            trace!("Skipping comment at line {}", idx + 1);
            continue;
        }
        if line.trim().is_empty() {
            if let Some(chunk) = current.take() {
                chunks.push(chunk);
            }
            continue;
        }
        match &mut current {
            Some(chunk) => {
                chunk.text.push('\n');
                chunk.text.push_str(line);
            }
            None => {
                current = Some(Chunk {
                    line: idx + 1,
                    text: line.to_owned(),
                });
            }
        }
    }
    chunks.extend(current);
    chunks
}

fn to_slide(chunk: Chunk, path: &Path) -> Result<Slide> {
    match chunk.text.strip_prefix(IMAGE_DIRECTIVE) {
        Some(image) => {
            let image = image.trim();
            if image.is_empty() {
                return Err(Error::Parse {
                    path: path.to_path_buf(),
                    line: chunk.line,
                    reason: format!("`{IMAGE_DIRECTIVE}` needs an image path"),
                });
            }
            Ok(Slide::Image(image.into()))
        }
        None => Ok(Slide::Markup(Markup::parse(&chunk.text))),
    }
}

/// Parse the slides out of `input`. `path` is only used in error messages.
pub fn parse(input: &str, path: &Path) -> Result<Vec<Slide>> {
    let slides = chunks(input)
        .into_iter()
        .map(|chunk| to_slide(chunk, path))
        .collect::<Result<Vec<_>>>()?;
    debug!("Parsed {} slides from {}", slides.len(), path.display());
    Ok(slides)
}
