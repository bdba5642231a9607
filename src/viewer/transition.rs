//! The fade-through-black between two slides.
//!
//! The controller owns the current slide index. A fade is driven by
//! [`TransitionController::tick`], which the host calls from a repeating
//! timer: the screen darkens, the index changes while it is fully black,
//! and the screen lightens again.

use std::time::Duration;

use tracing::{debug, trace, warn};

/// Alpha past which the fade turns around. Above 1 so that at least one
/// fully black frame gets painted before the new slide shows up.
pub const OVERSHOOT: f32 = 1.1;
/// Default alpha change per tick.
pub const DEFAULT_STEP: f32 = 0.1;
/// Smallest accepted step. Anything smaller barely moves an `f32` near 1.
pub const MIN_STEP: f32 = 0.001;
/// Default timer period.
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(20);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Darkening the current slide.
    FadingOut,
    /// Lightening the new slide.
    FadingIn,
}

/// What happened to a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Nothing to do.
    Ignored,
    /// The target is not a slide.
    Rejected,
    /// A fade is already running.
    Busy,
    /// The index changed immediately, repaint.
    Jumped,
    /// A fade started: arm the timer.
    Started,
}

impl Request {
    /// Did the slide (or the fade) change?
    #[must_use]
    pub fn accepted(self) -> bool {
        matches!(self, Request::Jumped | Request::Started)
    }
}

/// Whether the timer should fire again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Stop,
}

/// Whether a fade with this step reaches both ends in a finite number of
/// ticks.
#[must_use]
pub fn is_valid_step(step: f32) -> bool {
    step.is_finite() && (MIN_STEP..=OVERSHOOT).contains(&step)
}

#[derive(Debug, Clone)]
pub struct TransitionController {
    current: usize,
    len: usize,
    phase: Phase,
    alpha: f32,
    target: Option<usize>,
    step: f32,
    enabled: bool,
}

impl TransitionController {
    /// A controller over `len` slides, showing the first one.
    #[must_use]
    pub fn new(len: usize) -> Self {
        TransitionController {
            current: 0,
            len,
            phase: Phase::Idle,
            alpha: 0.,
            target: None,
            step: DEFAULT_STEP,
            enabled: true,
        }
    }

    /// Change the alpha step per tick. Steps outside
    /// `[MIN_STEP, OVERSHOOT]` would never finish a fade, they are ignored.
    #[must_use]
    pub fn with_step(mut self, step: f32) -> Self {
        if is_valid_step(step) {
            self.step = step;
        } else {
            warn!("Ignoring fade step {}, keeping {}", step, self.step);
        }
        self
    }

    /// When disabled, every move is an immediate jump.
    #[must_use]
    pub fn with_fades(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn target(&self) -> Option<usize> {
        self.target
    }

    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// The opacity of the black mask to paint over the current slide.
    #[must_use]
    pub fn mask_alpha(&self) -> f32 {
        match self.phase {
            Phase::Idle => 0.,
            Phase::FadingOut | Phase::FadingIn => self.alpha.clamp(0., 1.),
        }
    }

    #[must_use]
    pub fn in_progress(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Move by `delta` slides, fading if `should_animate(from, to)` says so.
    pub fn request<F>(&mut self, delta: isize, should_animate: F) -> Request
    where
        F: FnOnce(usize, usize) -> bool,
    {
        if delta == 0 {
            return Request::Ignored;
        }
        let target = match self.current.checked_add_signed(delta) {
            Some(t) if t < self.len => t,
            _ => {
                trace!("Refusing to move from {} by {}", self.current, delta);
                return Request::Rejected;
            }
        };
        if self.in_progress() {
            trace!("Fade in progress, ignoring move to {}", target);
            return Request::Busy;
        }
        if !self.enabled || !should_animate(self.current, target) {
            self.current = target;
            return Request::Jumped;
        }
        debug!("Fading from {} to {}", self.current, target);
        self.phase = Phase::FadingOut;
        self.alpha = 0.;
        self.target = Some(target);
        Request::Started
    }

    /// Go straight to `index`, dropping any fade.
    pub fn jump_to(&mut self, index: usize) -> Request {
        if index >= self.len {
            return Request::Rejected;
        }
        self.abort();
        if index == self.current {
            return Request::Ignored;
        }
        self.current = index;
        Request::Jumped
    }

    /// Stop any fade. The index stays whatever it currently is.
    pub fn abort(&mut self) {
        if self.in_progress() {
            debug!("Aborting fade at alpha {}", self.alpha);
        }
        self.phase = Phase::Idle;
        self.alpha = 0.;
        self.target = None;
    }

    /// Advance the fade by one step.
    pub fn tick(&mut self) -> Tick {
        match self.phase {
            Phase::Idle => Tick::Stop,
            Phase::FadingOut => {
                self.alpha += self.step;
                if self.alpha > OVERSHOOT {
                    self.phase = Phase::FadingIn;
                    if let Some(target) = self.target {
                        trace!("Fully black, switching to {}", target);
                        self.current = target;
                    }
                }
                Tick::Continue
            }
            Phase::FadingIn => {
                self.alpha -= self.step;
                if self.alpha < 0. {
                    self.abort();
                    return Tick::Stop;
                }
                Tick::Continue
            }
        }
    }

    /// The number of slides changed: keep the index valid and drop any fade.
    pub fn set_len(&mut self, len: usize) {
        self.abort();
        self.len = len;
        if self.current >= len {
            self.current = len.saturating_sub(1);
        }
    }
}
