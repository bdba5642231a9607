#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]

/*!
# Presenter: slideshows from a folder of pictures and a text file.

Two styles of slides are supported. The *caption* style shows a photo
covering the whole screen, with a line of text on a translucent band at the
top. The *full-bleed* style shows big, centered text on black, with some
words in red, or pictures shown whole.

Slides come from a plain text file (one slide per paragraph, `img::` for
pictures, `*` around red words) or from a JSON manifest. They can be shown
in a window, with fades to black between slides, or exported to image files
and PDF.
*/

pub mod backends;
pub mod config;
pub mod error;
pub mod export;
pub mod imageloader;
pub mod parser;
pub mod render;
pub mod slideshow;
pub mod viewer;

pub use error::{Error, Result};
