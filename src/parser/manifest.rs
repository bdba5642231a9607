//! JSON manifests, for presentations that are easier to describe as data.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::render::Style;
use crate::slideshow::{Markup, Presentation, Slide, Transitions};

#[derive(serde::Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct CaptionEntry {
    image: PathBuf,
    #[serde(default)]
    caption: String,
}

#[derive(serde::Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct ImageEntry {
    image: PathBuf,
}

#[derive(serde::Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct MarkupEntry {
    markup: String,
}

#[derive(serde::Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct StatementEntry {
    text: String,
    #[serde(default)]
    emphasis: bool,
}

/// Each kind of entry is told apart by its fields, mixing them is an error.
#[derive(serde::Deserialize, Debug)]
#[serde(untagged)]
enum FullBleedEntry {
    Image(ImageEntry),
    Markup(MarkupEntry),
    Statement(StatementEntry),
}

impl From<FullBleedEntry> for Slide {
    fn from(entry: FullBleedEntry) -> Self {
        match entry {
            FullBleedEntry::Image(ImageEntry { image }) => Slide::Image(image),
            FullBleedEntry::Markup(MarkupEntry { markup }) => Slide::Markup(Markup::parse(&markup)),
            FullBleedEntry::Statement(StatementEntry { text, emphasis }) => Slide::Statement { text, emphasis },
        }
    }
}

#[derive(serde::Deserialize, Debug)]
#[serde(tag = "style", rename_all = "kebab-case")]
enum Manifest {
    Caption {
        slides: Vec<CaptionEntry>,
        #[serde(default)]
        transitions: Transitions,
    },
    FullBleed {
        slides: Vec<FullBleedEntry>,
        #[serde(default)]
        transitions: Transitions,
    },
}

/// Build a presentation out of a manifest. Relative image paths are
/// resolved against `base_folder`.
pub fn parse(input: &str, base_folder: &Path) -> Result<Presentation> {
    let manifest: Manifest = serde_json::from_str(input)?;
    let presentation = match manifest {
        Manifest::Caption {
            slides,
            transitions,
        } => {
            let slides = slides
                .into_iter()
                .map(|entry| Slide::Captioned {
                    image: base_folder.join(entry.image),
                    caption: entry.caption,
                })
                .collect();
            Presentation::new(slides, Style::Caption)?.with_transitions(transitions)
        }
        Manifest::FullBleed {
            slides,
            transitions,
        } => {
            let slides = slides.into_iter().map(Slide::from).collect();
            Presentation::new(slides, Style::full_bleed(base_folder))?.with_transitions(transitions)
        }
    };
    Ok(presentation)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_caption_manifest() {
        let input = r#"{
            "style": "caption",
            "slides": [
                { "image": "a.png", "caption": "Noch Fragen?" },
                { "image": "/abs/b.jpg", "caption": "A History of\nComputing Machinery" },
                { "image": "c.jpg" }
            ]
        }"#;
        let p = parse(input, Path::new("/deck")).unwrap();
        assert_eq!(p.len(), 3);
        assert_eq!(p.style(), &Style::Caption);
        assert_eq!(
            p.get(0),
            Some(&Slide::Captioned {
                image: "/deck/a.png".into(),
                caption: "Noch Fragen?".into()
            })
        );
        assert_eq!(
            p.get(1),
            Some(&Slide::Captioned {
                image: "/abs/b.jpg".into(),
                caption: "A History of\nComputing Machinery".into()
            })
        );
        assert!(p.should_animate(0, 1));
    }

    #[test]
    fn test_full_bleed_manifest() {
        let input = r#"{
            "style": "full-bleed",
            "transitions": "images-only",
            "slides": [
                { "text": "Big", "emphasis": true },
                { "image": "bg.jpg" },
                { "markup": "some *hot* text" },
                { "text": "quiet" }
            ]
        }"#;
        let p = parse(input, Path::new("/deck")).unwrap();
        assert_eq!(p.style(), &Style::full_bleed(Path::new("/deck")));
        assert_eq!(
            p.slides(),
            &[
                Slide::Statement {
                    text: "Big".into(),
                    emphasis: true
                },
                Slide::Image("bg.jpg".into()),
                Slide::Markup(Markup::parse("some *hot* text")),
                Slide::Statement {
                    text: "quiet".into(),
                    emphasis: false
                },
            ]
        );
        assert!(!p.should_animate(0, 1));
    }

    #[test]
    fn test_bad_manifests() {
        assert!(matches!(
            parse(r#"{"style": "caption", "slides": []}"#, Path::new(".")),
            Err(Error::EmptyPresentation)
        ));
        assert!(matches!(
            parse(r#"{"style": "fancy", "slides": []}"#, Path::new(".")),
            Err(Error::Manifest(_))
        ));
        assert!(matches!(
            parse(r#"{"style": "caption", "slides": [{"text": "x"}]}"#, Path::new(".")),
            Err(Error::Manifest(_))
        ));
    }

    #[test]
    fn test_mixed_full_bleed_entries() {
        for entry in [
            r#"{"image": "a.jpg", "markup": "x"}"#,
            r#"{"text": "x", "image": "a.jpg"}"#,
            r#"{"markup": "x", "emphasis": true}"#,
            r#"{"text": "x", "colour": "red"}"#,
        ] {
            let input = format!(r#"{{"style": "full-bleed", "slides": [{entry}]}}"#);
            assert!(
                matches!(parse(&input, Path::new(".")), Err(Error::Manifest(_))),
                "{entry} should be refused"
            );
        }
    }
}
