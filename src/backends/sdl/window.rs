use sdl2::render::Canvas;
use sdl2::video::Window;
use tracing::warn;

use crate::config::WindowOptions;
use crate::error::{Error, Result};

fn build_window(video: &sdl2::VideoSubsystem, title: &str, options: &WindowOptions) -> Result<Window> {
    let mut windowbuilder = video.window(title, options.size.width, options.size.height);
    windowbuilder.position_centered();
    if options.resizable {
        windowbuilder.resizable();
    }
    if options.fullscreen {
        windowbuilder.fullscreen_desktop();
    }
    windowbuilder.build().map_err(|e| Error::sdl(e.to_string()))
}

/// Open the presentation window, accelerated if possible.
pub fn get_canvas(context: &sdl2::Sdl, title: &str, options: &WindowOptions) -> Result<Canvas<Window>> {
    let video_subsystem = context.video().map_err(Error::Sdl)?;
    let window = build_window(&video_subsystem, title, options)?;

    match window.into_canvas().accelerated().present_vsync().build() {
        Ok(canvas) => Ok(canvas),
        Err(e) => {
            warn!("Unable to build an accelerated context ({}), trying the plain one.", e);
            // The failed builder consumed the window.
            let window = build_window(&video_subsystem, title, options)?;
            window
                .into_canvas()
                .software()
                .build()
                .map_err(|e| Error::sdl(e.to_string()))
        }
    }
}
