//! The windowed presenter, independent of any window system.
//!
//! [`Presenter`] receives [`Input`]s, moves between slides, and hands out the
//! frame to paint. It is generic over the frame type so the host decides
//! what a rendered slide is.

pub mod cache;
pub mod input;
pub mod transition;

use tracing::{debug, info, trace};

use self::cache::FrameCache;
use self::input::{Input, Key};
use self::transition::{Request, Tick, TransitionController};
use crate::render::Style;
use crate::slideshow::{Presentation, Slide};

/// Slide numbers longer than this are not slide numbers.
const GOTO_MAX_DIGITS: usize = 6;

/// What the host has to do after an input was handled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Effects {
    pub redraw: bool,
    /// Start the repeating timer.
    pub arm_timer: bool,
    /// Stop the repeating timer.
    pub stop_timer: bool,
    /// Enter (`Some(true)`) or leave (`Some(false)`) fullscreen.
    pub fullscreen: Option<bool>,
    pub quit: bool,
}

impl Effects {
    fn redraw() -> Self {
        Effects {
            redraw: true,
            ..Default::default()
        }
    }

    fn from_request(req: Request) -> Self {
        Effects {
            redraw: req.accepted(),
            arm_timer: req == Request::Started,
            ..Default::default()
        }
    }
}

/// A frame ready to be shown: the rendered slide and the opacity of the
/// black mask to draw over it.
#[derive(Debug)]
pub struct Frame<'a, T> {
    pub index: usize,
    pub surface: &'a T,
    pub mask_alpha: f32,
}

/// Options for the presenter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresenterOptions {
    pub fades: bool,
    pub fade_step: f32,
}

impl Default for PresenterOptions {
    fn default() -> Self {
        PresenterOptions {
            fades: true,
            fade_step: transition::DEFAULT_STEP,
        }
    }
}

/// The window controller shared by every host.
pub struct Presenter<T> {
    presentation: Presentation,
    cache: FrameCache<T>,
    transition: TransitionController,
    options: PresenterOptions,
    goto_buffer: Option<String>,
    fullscreen: bool,
}

impl<T> Presenter<T> {
    #[must_use]
    pub fn new(presentation: Presentation, viewport: (u32, u32), options: PresenterOptions) -> Self {
        let transition = TransitionController::new(presentation.len())
            .with_step(options.fade_step)
            .with_fades(options.fades);
        Presenter {
            presentation,
            cache: FrameCache::new(viewport.0, viewport.1),
            transition,
            options,
            goto_buffer: None,
            fullscreen: false,
        }
    }

    #[must_use]
    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    #[must_use]
    pub fn transition(&self) -> &TransitionController {
        &self.transition
    }

    #[must_use]
    pub fn cache(&self) -> &FrameCache<T> {
        &self.cache
    }

    #[must_use]
    pub fn current(&self) -> usize {
        self.transition.current()
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Swap in new slides, e.g. after the source file changed. The cached
    /// frames are stale, and the index is kept if it is still valid.
    pub fn set_presentation(&mut self, presentation: Presentation) -> Effects {
        info!("Loaded {} slides", presentation.len());
        self.cache.invalidate_all();
        self.transition.set_len(presentation.len());
        self.presentation = presentation;
        Effects {
            redraw: true,
            stop_timer: true,
            ..Default::default()
        }
    }

    /// React to one input.
    pub fn handle(&mut self, input: Input) -> Effects {
        trace!("Input: {:?}", input);
        match input {
            Input::Key(key) => self.handle_key(key),
            Input::Click { .. } => self.step(1),
            Input::Resize { width, height } => {
                // A running fade keeps going, only the frames are dropped.
                self.cache.set_viewport(width, height);
                Effects::redraw()
            }
            Input::FullscreenChanged(fullscreen) => {
                self.fullscreen = fullscreen;
                self.cache.invalidate_all();
                Effects::redraw()
            }
            Input::Tick => match self.transition.tick() {
                Tick::Continue => Effects::redraw(),
                Tick::Stop => Effects {
                    redraw: true,
                    stop_timer: true,
                    ..Default::default()
                },
            },
            Input::Expose => Effects::redraw(),
        }
    }

    fn handle_key(&mut self, key: Key) -> Effects {
        match key {
            Key::Next => self.step(1),
            Key::Previous => self.step(-1),
            Key::First => self.jump_to(0),
            Key::Last => self.jump_to(self.presentation.len().saturating_sub(1)),
            Key::ToggleFullscreen => Effects {
                fullscreen: Some(!self.fullscreen),
                ..Default::default()
            },
            Key::Escape if self.fullscreen => Effects {
                fullscreen: Some(false),
                ..Default::default()
            },
            Key::Escape | Key::Quit => Effects {
                quit: true,
                ..Default::default()
            },
            Key::Digit(d) => {
                let buffer = self.goto_buffer.get_or_insert_with(String::new);
                if buffer.len() < GOTO_MAX_DIGITS {
                    buffer.push(char::from(b'0' + d));
                }
                Effects::default()
            }
            Key::Goto => self.goto(),
            Key::Other => Effects::default(),
        }
    }

    /// Jump to the 1-based slide number typed so far.
    fn goto(&mut self) -> Effects {
        let Some(buffer) = self.goto_buffer.take() else {
            return Effects::default();
        };
        match buffer.parse::<usize>() {
            Ok(number) if number >= 1 => {
                debug!("Going to slide {}", number);
                self.jump_to(number - 1)
            }
            _ => Effects::default(),
        }
    }

    /// Absolute move. A running fade is dropped, and so is its timer.
    fn jump_to(&mut self, index: usize) -> Effects {
        let was_fading = self.transition.in_progress();
        let mut effects = Effects::from_request(self.transition.jump_to(index));
        if was_fading && !self.transition.in_progress() {
            effects.redraw = true;
            effects.stop_timer = true;
        }
        effects
    }

    fn step(&mut self, delta: isize) -> Effects {
        let presentation = &self.presentation;
        let req = self
            .transition
            .request(delta, |from, to| presentation.should_animate(from, to));
        Effects::from_request(req)
    }

    /// The frame to paint now, rendering the current slide through the cache
    /// if needed.
    pub fn frame<E, F>(&mut self, render: F) -> Result<Frame<'_, T>, E>
    where
        F: FnOnce(&Style, &Slide, u32, u32) -> Result<T, E>,
    {
        let index = self.transition.current();
        let mask_alpha = self.transition.mask_alpha();
        let presentation = &self.presentation;
        let surface = self.cache.get_or_render(index, |width, height| {
            // The index always points to a slide: checked when it is set.
            let slide = &presentation.slides()[index];
            render(presentation.style(), slide, width, height)
        })?;
        Ok(Frame {
            index,
            surface,
            mask_alpha,
        })
    }
}
