//! The provided SDL2 backend.
//!
//! A thin adapter: SDL events become [`Input`]s for the [`Presenter`], and
//! its frames are copied to the window with the fade mask on top.

use std::time::{Duration, Instant};

use sdl2::event::{Event, WindowEvent};
use sdl2::mouse::MouseButton;
use sdl2::pixels::Color;
use sdl2::render::{BlendMode, Canvas, TextureCreator};
use sdl2::surface::Surface;
use sdl2::video::{FullscreenType, Window, WindowContext};
use tracing::{debug, error, warn};

use self::timer::Ticker;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::render::{self, Fonts};
use crate::slideshow::Presentation;
use crate::viewer::input::{Input, Key};
use crate::viewer::{Effects, Presenter};

pub mod timer;
pub mod window;

/// Longest wait for events, so reloads are picked up while idle.
const IDLE_WAIT: Duration = Duration::from_millis(100);

/// Helper: init the SDL context.
pub fn get_sdl_context() -> Result<sdl2::Sdl> {
    let sdl_context = sdl2::init().map_err(Error::Sdl)?;
    sdl2::hint::set("SDL_RENDER_SCALE_QUALITY", "1");
    Ok(sdl_context)
}

/// Helper: init the TTF context.
pub fn get_ttf_context() -> Result<sdl2::ttf::Sdl2TtfContext> {
    sdl2::ttf::init().map_err(|e| Error::sdl(e.to_string()))
}

/// The opacity byte of a mask in `[0, 1]`.
#[must_use]
pub fn mask_alpha_byte(alpha: f32) -> u8 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let byte = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    byte
}

/// The backend. Stores all the SDL internals.
/// This structure needs to created only once, and is used to get the live
/// context.
pub struct Backend {
    pub sdl_context: sdl2::Sdl,
    pub ttf_context: sdl2::ttf::Sdl2TtfContext,
    // Keeps SDL_image loaded for the image loader.
    _image_context: sdl2::image::Sdl2ImageContext,
    config: Config,
    title: String,
}

impl Backend {
    /// Create a new backend.
    pub fn new(config: Config, title: &str) -> Result<Backend> {
        let sdl_context = get_sdl_context()?;
        let image_context =
            sdl2::image::init(sdl2::image::InitFlag::PNG | sdl2::image::InitFlag::JPG).map_err(Error::Sdl)?;
        let ttf_context = get_ttf_context()?;
        Ok(Backend {
            sdl_context,
            ttf_context,
            _image_context: image_context,
            config,
            title: title.to_owned(),
        })
    }
}

impl super::Backend for Backend {
    fn get_context(&mut self, presentation: Presentation) -> Result<Box<dyn super::Context + '_>> {
        let fonts = Fonts::new(&self.ttf_context, &self.config.font)?;
        let canvas = window::get_canvas(&self.sdl_context, &self.title, &self.config.window)?;
        let viewport = canvas.output_size().map_err(Error::Sdl)?;
        let texture_creator = canvas.texture_creator();
        let event_pump = self.sdl_context.event_pump().map_err(Error::Sdl)?;

        let mut presenter = Presenter::new(presentation, viewport, self.config.presenter);
        if self.config.window.fullscreen {
            presenter.handle(Input::FullscreenChanged(true));
        }
        debug!("Window ready, drawing at {}x{}", viewport.0, viewport.1);

        Ok(Box::new(Context {
            canvas,
            texture_creator,
            event_pump,
            fonts,
            presenter,
            ticker: Ticker::new(self.config.fade_period),
            is_changed: true,
        }))
    }
}

/// The context, which contains the live data.
pub struct Context<'backend> {
    canvas: Canvas<Window>,
    texture_creator: TextureCreator<WindowContext>,
    event_pump: sdl2::EventPump,
    fonts: Fonts<'backend>,
    presenter: Presenter<Surface<'static>>,
    ticker: Ticker,
    /// If the window has to be drawn again.
    is_changed: bool,
}

impl Context<'_> {
    /// Carry out what the presenter asked for.
    fn apply(&mut self, effects: Effects) -> super::ShouldQuit {
        if effects.arm_timer {
            self.ticker.arm(Instant::now());
        }
        if effects.stop_timer {
            self.ticker.stop();
        }
        if effects.redraw {
            self.is_changed = true;
        }
        if let Some(fullscreen) = effects.fullscreen {
            let mode = if fullscreen {
                FullscreenType::Desktop
            } else {
                FullscreenType::Off
            };
            match self.canvas.window_mut().set_fullscreen(mode) {
                Ok(()) => {
                    let effects = self.presenter.handle(Input::FullscreenChanged(fullscreen));
                    self.apply(effects);
                    self.resized();
                }
                Err(e) => warn!("Unable to change fullscreen mode: {}", e),
            }
        }
        effects.quit
    }

    /// Tell the presenter the drawable size, which may differ from the
    /// window size on high DPI screens.
    fn resized(&mut self) {
        match self.canvas.output_size() {
            Ok((width, height)) => {
                let effects = self.presenter.handle(Input::Resize { width, height });
                self.apply(effects);
            }
            Err(e) => warn!("Unable to read the window size: {}", e),
        }
    }

    fn to_input(event: &Event) -> Option<Input> {
        match event {
            Event::KeyDown {
                keycode: Some(keycode),
                ..
            } => Some(Input::Key(Key::from_name(&keycode.name()))),
            Event::MouseButtonDown {
                mouse_btn: MouseButton::Left,
                x,
                y,
                ..
            } => Some(Input::Click { x: *x, y: *y }),
            Event::Window {
                win_event: WindowEvent::Exposed,
                ..
            } => Some(Input::Expose),
            _ => None,
        }
    }

    fn manage_event(&mut self, event: &Event) -> super::ShouldQuit {
        match event {
            Event::Quit { .. }
            | Event::Window {
                win_event: WindowEvent::Close,
                ..
            } => true,
            Event::Window {
                win_event: WindowEvent::SizeChanged(..) | WindowEvent::Resized(..),
                ..
            } => {
                self.resized();
                false
            }
            _ => match Self::to_input(event) {
                Some(input) => {
                    let effects = self.presenter.handle(input);
                    self.apply(effects)
                }
                None => false,
            },
        }
    }
}

impl super::Context for Context<'_> {
    fn set_presentation(&mut self, presentation: Presentation) {
        let effects = self.presenter.set_presentation(presentation);
        self.apply(effects);
    }

    /// Manage the incoming events, sleeping until one arrives or the fade
    /// timer is due.
    fn manage_inputs(&mut self) -> Result<super::ShouldQuit> {
        let timeout = self.ticker.timeout(Instant::now(), IDLE_WAIT);
        let timeout = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
        let first = self.event_pump.wait_event_timeout(timeout);
        let events: Vec<Event> = first.into_iter().chain(self.event_pump.poll_iter()).collect();

        for event in &events {
            if self.manage_event(event) {
                return Ok(true);
            }
        }
        if self.ticker.fire(Instant::now()) {
            let effects = self.presenter.handle(Input::Tick);
            return Ok(self.apply(effects));
        }
        Ok(false)
    }

    /// Render the current frame and the fade mask.
    fn render(&mut self) -> Result<()> {
        if !self.is_changed {
            return Ok(());
        }
        self.is_changed = false;

        let current = self.presenter.current();
        let (width, height) = self.presenter.cache().viewport();
        let fonts = &self.fonts;
        let frame = self
            .presenter
            .frame(|style, slide, w, h| render::render_to_surface(style, fonts, w, h, slide));
        let (texture, mask_alpha) = match frame {
            Ok(frame) => (
                self.texture_creator.create_texture_from_surface(frame.surface)?,
                frame.mask_alpha,
            ),
            Err(e) => {
                // Shown until the next paint, never cached.
                error!("Unable to render slide {}: {}", current + 1, e);
                let surface = render::render_error(fonts, width, height, &e.to_string())?;
                (self.texture_creator.create_texture_from_surface(&surface)?, 0.0)
            }
        };

        self.canvas.set_blend_mode(BlendMode::None);
        self.canvas.set_draw_color(Color::BLACK);
        self.canvas.clear();
        let copied = self.canvas.copy(&texture, None, None).map_err(Error::Sdl);
        // @safety This is ok, since the texture has been copied and we can
        // safely remove it.
        unsafe {
            texture.destroy();
        }
        copied?;

        let alpha = mask_alpha_byte(mask_alpha);
        if alpha > 0 {
            self.canvas.set_blend_mode(BlendMode::Blend);
            self.canvas.set_draw_color(Color::RGBA(0, 0, 0, alpha));
            self.canvas.fill_rect(None).map_err(Error::Sdl)?;
        }
        self.canvas.present();
        Ok(())
    }
}
