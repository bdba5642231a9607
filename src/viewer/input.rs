//! Host-independent input events.
//!
//! Host adapters translate their native events into [`Input`] and hand them
//! to the presenter.

/// What a key press means to the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Next,
    Previous,
    First,
    Last,
    ToggleFullscreen,
    /// Leave fullscreen, or quit when windowed.
    Escape,
    Quit,
    /// A digit of a slide number.
    Digit(u8),
    /// Go to the slide number typed so far.
    Goto,
    Other,
}

impl Key {
    /// Map a logical key name to its meaning.
    ///
    /// Names are matched ignoring case, spaces and underscores, so both
    /// `Page_Down` and `PageDown` work.
    #[must_use]
    pub fn from_name(name: &str) -> Key {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '_' && !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();
        let digit = normalized
            .strip_prefix("keypad")
            .unwrap_or(&normalized)
            .parse::<u8>()
            .ok()
            .filter(|d| *d < 10);
        if let Some(d) = digit {
            return Key::Digit(d);
        }
        match normalized.as_str() {
            "right" | "space" | "pagedown" | "n" => Key::Next,
            "left" | "backspace" | "pageup" | "p" => Key::Previous,
            "home" => Key::First,
            "end" => Key::Last,
            "f" | "f5" => Key::ToggleFullscreen,
            "escape" => Key::Escape,
            "q" => Key::Quit,
            "return" | "enter" | "keypadenter" | "g" => Key::Goto,
            _ => Key::Other,
        }
    }
}

/// An event coming from the host window system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Key(Key),
    /// Primary button pressed at these coordinates.
    Click { x: i32, y: i32 },
    /// The drawable area changed size.
    Resize { width: u32, height: u32 },
    FullscreenChanged(bool),
    /// The repeating timer fired.
    Tick,
    /// The window needs repainting.
    Expose,
}
