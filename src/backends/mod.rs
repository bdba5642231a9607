pub mod sdl;

use crate::error::Result;
use crate::slideshow::Presentation;

pub type ShouldQuit = bool;

pub trait Backend {
    /// Open the window showing `presentation`.
    fn get_context(&mut self, presentation: Presentation) -> Result<Box<dyn Context + '_>>;
}

/// The definition of a backend.
/// It has to be able to swap the presentation, manage inputs, and render.
pub trait Context {
    /// Show new slides, e.g. after the source file was reloaded.
    fn set_presentation(&mut self, presentation: Presentation);
    /// Wait a bit for the user's input, and react to it.
    fn manage_inputs(&mut self) -> Result<ShouldQuit>;
    /// Render to screen, if anything changed.
    fn render(&mut self) -> Result<()>;
}
