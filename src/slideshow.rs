//! The slideshow definition.

use std::fmt;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::render::Style;

/// A run of text sharing the same emphasis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub emphasis: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Span {
            text: text.into(),
            emphasis: false,
        }
    }

    pub fn emphasized(text: impl Into<String>) -> Self {
        Span {
            text: text.into(),
            emphasis: true,
        }
    }
}

/// Rich text for the full-bleed style: a list of lines, each made of spans.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Markup {
    pub lines: Vec<Vec<Span>>,
}

impl Markup {
    /// Parse the inline `*emphasis*` syntax.
    ///
    /// Every `*` toggles the emphasis. An emphasis still open at the end of
    /// the text is closed there, so it never leaks anywhere else.
    #[must_use]
    pub fn parse(text: &str) -> Markup {
        let mut emphasis = false;
        let lines = text
            .lines()
            .map(|line| parse_line(line, &mut emphasis))
            .collect();
        Markup { lines }
    }
}

/// Split a single line into spans, carrying the emphasis state across lines.
fn parse_line(line: &str, emphasis: &mut bool) -> Vec<Span> {
    let mut spans = vec![];
    for (idx, chunk) in line.split('*').enumerate() {
        if idx > 0 {
            *emphasis = !*emphasis;
        }
        if !chunk.is_empty() {
            spans.push(Span {
                text: chunk.to_owned(),
                emphasis: *emphasis,
            });
        }
    }
    spans
}

/// The representation of a single slide.
#[derive(Debug, Clone, PartialEq)]
pub enum Slide {
    /// A background image covered by a caption box.
    Captioned { image: PathBuf, caption: String },
    /// A full-bleed image, letterboxed on black.
    Image(PathBuf),
    /// Centered rich text on black.
    Markup(Markup),
    /// Centered plain text on black, either white or in the accent color.
    Statement { text: String, emphasis: bool },
}

impl Slide {
    #[must_use]
    pub fn is_image(&self) -> bool {
        matches!(self, Slide::Captioned { .. } | Slide::Image(_))
    }
}

/// When a slide change should fade through black.
#[derive(serde::Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Transitions {
    #[default]
    Always,
    Never,
    /// Only fade between two image slides.
    ImagesOnly,
}

/// The whole slideshow we have to render: the slides, in display order, and
/// the style used to paint them.
pub struct Presentation {
    slides: Vec<Slide>,
    style: Style,
    should_animate: Box<dyn Fn(&Slide, &Slide) -> bool>,
}

impl fmt::Debug for Presentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Presentation")
            .field("slides", &self.slides)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

impl Presentation {
    /// Bind the slides to a style.
    ///
    /// Fails when there are no slides, or when a slide cannot be drawn by
    /// `style`.
    pub fn new(slides: Vec<Slide>, style: Style) -> Result<Presentation> {
        if slides.is_empty() {
            return Err(Error::EmptyPresentation);
        }
        if let Some(index) = slides.iter().position(|s| !style.accepts(s)) {
            return Err(Error::StyleMismatch {
                index,
                style: style.name(),
            });
        }
        Ok(Presentation {
            slides,
            style,
            should_animate: Box::new(|_, _| true),
        })
    }

    /// Replace the "should this change fade?" predicate.
    #[must_use]
    pub fn with_should_animate<F>(mut self, f: F) -> Presentation
    where
        F: Fn(&Slide, &Slide) -> bool + 'static,
    {
        self.should_animate = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_transitions(self, transitions: Transitions) -> Presentation {
        match transitions {
            Transitions::Always => self.with_should_animate(|_, _| true),
            Transitions::Never => self.with_should_animate(|_, _| false),
            Transitions::ImagesOnly => {
                self.with_should_animate(|from, to| from.is_image() && to.is_image())
            }
        }
    }

    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always false: an empty presentation cannot be built.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    #[must_use]
    pub fn get(&self, idx: usize) -> Option<&Slide> {
        self.slides.get(idx)
    }

    #[must_use]
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Should moving from slide `from` to slide `to` be animated?
    /// Indices out of range are never animated.
    #[must_use]
    pub fn should_animate(&self, from: usize, to: usize) -> bool {
        match (self.slides.get(from), self.slides.get(to)) {
            (Some(a), Some(b)) => (self.should_animate)(a, b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_markup_balanced() {
        let m = Markup::parse("a *hot* topic");
        assert_eq!(
            m.lines,
            vec![vec![
                Span::plain("a "),
                Span::emphasized("hot"),
                Span::plain(" topic")
            ]]
        );
    }

    #[test]
    fn test_markup_spans_lines() {
        let m = Markup::parse("*one\ntwo* three");
        assert_eq!(
            m.lines,
            vec![
                vec![Span::emphasized("one")],
                vec![Span::emphasized("two"), Span::plain(" three")]
            ]
        );
    }

    #[test]
    fn test_markup_unbalanced_closes_at_end() {
        let m = Markup::parse("*dangling");
        assert_eq!(m.lines, vec![vec![Span::emphasized("dangling")]]);
        // A fresh parse starts without emphasis.
        let m = Markup::parse("next");
        assert_eq!(m.lines, vec![vec![Span::plain("next")]]);
    }

    #[test]
    fn test_empty_presentation() {
        let r = Presentation::new(vec![], Style::Caption);
        assert!(matches!(r, Err(Error::EmptyPresentation)));
    }

    #[test]
    fn test_style_mismatch() {
        let slides = vec![
            Slide::Captioned {
                image: "a.png".into(),
                caption: String::new(),
            },
            Slide::Statement {
                text: "nope".into(),
                emphasis: false,
            },
        ];
        let r = Presentation::new(slides, Style::Caption);
        assert!(matches!(r, Err(Error::StyleMismatch { index: 1, .. })));
    }

    #[test]
    fn test_should_animate_policies() {
        let slides = vec![
            Slide::Image("a.png".into()),
            Slide::Image("b.png".into()),
            Slide::Statement {
                text: "c".into(),
                emphasis: true,
            },
        ];
        let style = Style::full_bleed(Path::new("."));
        let p = Presentation::new(slides.clone(), style.clone()).unwrap();
        assert!(p.should_animate(0, 2));
        assert!(!p.should_animate(0, 3));

        let p = Presentation::new(slides.clone(), style.clone())
            .unwrap()
            .with_transitions(Transitions::ImagesOnly);
        assert!(p.should_animate(0, 1));
        assert!(!p.should_animate(1, 2));

        let p = Presentation::new(slides, style)
            .unwrap()
            .with_transitions(Transitions::Never);
        assert!(!p.should_animate(0, 1));
    }
}
