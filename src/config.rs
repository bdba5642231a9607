//! Runtime configuration, passed explicitly to whatever needs it.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};
use crate::viewer::{transition, PresenterOptions};

/// Fonts tried, in order, when none is given on the command line.
pub const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBold.ttf",
    "/usr/share/fonts/gnu-free/FreeSansBold.otf",
    "/Library/Fonts/Arial Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// A `WIDTHxHEIGHT` size, as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
}

impl Geometry {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Geometry { width, height }
    }

    #[must_use]
    pub fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl FromStr for Geometry {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("`{s}` is not a WIDTHxHEIGHT size"))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<u32>()
                .ok()
                .filter(|v| *v > 0)
                .ok_or_else(|| format!("`{v}` is not a positive number"))
        };
        Ok(Geometry::new(parse(w)?, parse(h)?))
    }
}

/// Define the window options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowOptions {
    pub size: Geometry,
    pub resizable: bool,
    pub fullscreen: bool,
}

impl Default for WindowOptions {
    fn default() -> Self {
        WindowOptions {
            size: Geometry::new(800, 600),
            resizable: true,
            fullscreen: false,
        }
    }
}

/// Everything the viewer and the exporters need to know.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// The TrueType font used for all the text.
    pub font: PathBuf,
    pub window: WindowOptions,
    pub presenter: PresenterOptions,
    /// How often the fade timer fires.
    pub fade_period: Duration,
    /// Reload the presentation when its file changes.
    pub watch: bool,
}

impl Config {
    /// A configuration with default settings and the given font.
    #[must_use]
    pub fn with_font(font: PathBuf) -> Self {
        Config {
            font,
            window: WindowOptions::default(),
            presenter: PresenterOptions::default(),
            fade_period: transition::DEFAULT_PERIOD,
            watch: true,
        }
    }
}

/// Pick the font: the one given, or the first candidate that exists.
pub fn find_font(explicit: Option<&Path>, candidates: &[&str]) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(Error::Font {
            path: path.to_path_buf(),
            reason: "no such file".to_owned(),
        });
    }
    let found = candidates
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
        .ok_or(Error::NoFont)?;
    debug!("Using font {}", found.display());
    Ok(found)
}
