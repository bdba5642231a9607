//! The error type shared by the whole crate.

use std::path::PathBuf;

/// Everything that can go wrong while loading, rendering or exporting slides.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Neither the native nor the general purpose decoder could read the image.
    #[error("unable to decode `{}`: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    /// Errors reported by SDL, which only gives us strings.
    #[error("sdl: {0}")]
    Sdl(String),

    #[error("font `{}`: {reason}", path.display())]
    Font { path: PathBuf, reason: String },

    #[error("no usable font found, please provide one with --font")]
    NoFont,

    #[error("{}:{line}: {reason}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("a presentation needs at least one slide")]
    EmptyPresentation,

    /// The slide at `index` cannot be drawn by the presentation's style.
    #[error("slide {index} cannot be rendered with the {style} style")]
    StyleMismatch { index: usize, style: &'static str },

    #[error("the {0} style cannot draw this slide")]
    Unsupported(&'static str),

    #[error("export: {0}")]
    Export(String),
}

impl Error {
    pub fn sdl(msg: impl Into<String>) -> Self {
        Self::Sdl(msg.into())
    }
}

impl From<sdl2::ttf::FontError> for Error {
    fn from(e: sdl2::ttf::FontError) -> Self {
        Self::Sdl(e.to_string())
    }
}

impl From<sdl2::render::TextureValueError> for Error {
    fn from(e: sdl2::render::TextureValueError) -> Self {
        Self::Sdl(e.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Self::Export(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
