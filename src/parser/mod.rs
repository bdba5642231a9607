//! Read presentations from disk.
//!
//! Files ending in `.json` are manifests, anything else uses the plain text
//! format.

pub mod manifest;
pub mod text;

use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};
use crate::render::Style;
use crate::slideshow::Presentation;

fn is_manifest(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

/// Parse `input` as if it was read from `path`.
pub fn parse_str(input: &str, path: &Path) -> Result<Presentation> {
    let base_folder = path.parent().unwrap_or_else(|| Path::new(""));
    if is_manifest(path) {
        manifest::parse(input, base_folder)
    } else {
        let slides = text::parse(input, path)?;
        Presentation::new(slides, Style::full_bleed(base_folder))
    }
}

/// Parse the file, and return the presentation as a result.
pub fn parse_file(path: &Path) -> Result<Presentation> {
    if !path.is_file() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("`{}` is not a file, please provide one.", path.display()),
        )));
    }
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    // Read the whole file to a String.
    let mut file_to_string = String::new();
    reader.read_to_string(&mut file_to_string)?;
    let presentation = parse_str(&file_to_string, path)?;
    info!("Read {} slides from {}", presentation.len(), path.display());
    Ok(presentation)
}
