//! # Transposer / Renderer
//!
//! Turns parsed chords back into display text.
//!
//! ## Spelling rules
//! - Transposed tones keep a flat spelling if the source tone was flat
//!   (`Bb` up 3 is `Db`, not `C#`).
//! - [`RenderingOptions::prefer_flat`] overrides that for every tone, which is
//!   how a song's key signature drives the spelling.
//! - `use_h` renders B natural as `H` (German/Slavic notation). Display only.
//!
//! ## Text rewriting
//! [`render_chords`] copies song text unchanged except for chord tokens,
//! which are replaced by their rendered form, optionally wrapped in markup.

use crate::chord::Chord;
use crate::error::ParseError;
use crate::parser::parse_chords;
use crate::quality::ChordType;
use crate::tone::Tone;
use serde::Deserialize;
use std::collections::HashSet;

/// How chords are rendered. Plain value, passed into each call.
///
/// Can be loaded from YAML; every key is optional:
///
/// ```yaml
/// transpose: -2
/// use-h: true
/// prefer-flat: false
/// html-tag: span class="chord"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RenderingOptions {
    #[serde(rename = "transpose")]
    pub transpose_semitones: i32,
    pub use_h: bool,
    /// `Some(true)` spells every tone with flats, `Some(false)` with sharps,
    /// `None` keeps each tone's own spelling.
    pub prefer_flat: Option<bool>,
    /// Element name, optionally followed by attributes
    pub html_tag: Option<String>,
}

impl RenderingOptions {
    pub fn transposed(steps: i32) -> Self {
        Self {
            transpose_semitones: steps,
            ..Self::default()
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, ParseError> {
        serde_yaml::from_str(content).map_err(|e| ParseError::MetadataError(e.to_string()))
    }

    fn spell_flat(&self, tone: Tone) -> bool {
        self.prefer_flat.unwrap_or(tone.is_flat())
    }

    fn render_tone(&self, tone: Tone) -> &'static str {
        tone.transpose(self.transpose_semitones, self.spell_flat(tone))
            .name(self.use_h)
    }
}

/// Shift a tone by `steps` semitones.
pub fn transpose(tone: Tone, steps: i32, prefer_flat: bool) -> Tone {
    tone.transpose(steps, prefer_flat)
}

/// Render one chord as display text.
///
/// ```
/// use chordsheet::{render_chord, Chord, RenderingOptions};
///
/// let chord = Chord::parse("Bbmaj7/F").unwrap();
/// assert_eq!(render_chord(&chord, &RenderingOptions::transposed(1)), "Bmaj7/F#");
///
/// let options = RenderingOptions { use_h: true, ..RenderingOptions::transposed(2) };
/// assert_eq!(render_chord(&Chord::parse("Am").unwrap(), &options), "Hm");
/// ```
pub fn render_chord(chord: &Chord, options: &RenderingOptions) -> String {
    let mut text = String::from(options.render_tone(chord.tone));
    text.push_str(chord.chord_type.suffix());
    if let Some(bass) = chord.bass {
        text.push('/');
        text.push_str(options.render_tone(bass));
    }
    text
}

/// Display name of a minor key center, e.g. `"F#m"` or `"Hm"`.
pub fn render_key(key: Tone, options: &RenderingOptions) -> String {
    render_chord(&Chord::new(key, ChordType::Minor), options)
}

/// Opening and closing markup for a tag spec like `span class="chord"`
fn markup(tag: &str) -> (String, String) {
    let tag = tag.trim();
    let name = tag.split_whitespace().next().unwrap_or(tag);
    (format!("<{}>", tag), format!("</{}>", name))
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Rewrite `text` with every chord replaced by its rendered form.
///
/// ```
/// use chordsheet::{render_chords, RenderingOptions};
///
/// let options = RenderingOptions {
///     html_tag: Some("b".to_string()),
///     ..RenderingOptions::transposed(2)
/// };
/// assert_eq!(
///     render_chords("Am  G\nwe sing\n", &options),
///     "<b>Bm</b>  <b>A</b>\nwe sing\n"
/// );
/// ```
pub fn render_chords(text: &str, options: &RenderingOptions) -> String {
    let occurrences = parse_chords(text);
    let tags = options
        .html_tag
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .map(markup);

    let mut out = String::with_capacity(text.len());
    let mut next = occurrences.iter().peekable();
    let mut skip_until = 0;

    for (i, c) in text.chars().enumerate() {
        if i < skip_until {
            continue;
        }
        match next.next_if(|o| o.start == i) {
            Some(o) => {
                let rendered = render_chord(&o.chord, options);
                match &tags {
                    Some((open, close)) => {
                        out.push_str(open);
                        out.push_str(&escape_html(&rendered));
                        out.push_str(close);
                    }
                    None => out.push_str(&rendered),
                }
                skip_until = o.end;
            }
            None => out.push(c),
        }
    }

    out
}

/// Rendered chord names in first-seen order, each exactly once.
///
/// ```
/// use chordsheet::{unique_chord_names, RenderingOptions};
///
/// let names = unique_chord_names("Am G\nla la\nAm G C\n", &RenderingOptions::default());
/// assert_eq!(names, vec!["Am", "G", "C"]);
/// ```
pub fn unique_chord_names(text: &str, options: &RenderingOptions) -> Vec<String> {
    let mut seen = HashSet::new();
    parse_chords(text)
        .iter()
        .map(|o| render_chord(&o.chord, options))
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(token: &str, options: &RenderingOptions) -> String {
        render_chord(&Chord::parse(token).unwrap(), options)
    }

    #[test]
    fn test_render_untransposed_keeps_spelling() {
        let options = RenderingOptions::default();
        for token in ["C", "Bb", "A#m7", "Ebmaj7/G", "F#sus4", "Dbdim7", "G/F#"] {
            assert_eq!(render(token, &options), token);
        }
    }

    #[test]
    fn test_render_aliases_canonically() {
        let options = RenderingOptions::default();
        assert_eq!(render("Dmajor", &options), "D");
        assert_eq!(render("Eminor", &options), "Em");
        assert_eq!(render("Amin7", &options), "Am7");
    }

    #[test]
    fn test_transpose_preserves_flat_spelling() {
        assert_eq!(render("Bb", &RenderingOptions::transposed(3)), "Db");
        assert_eq!(render("Eb7", &RenderingOptions::transposed(-1)), "D7");
        assert_eq!(render("Ab", &RenderingOptions::transposed(-1)), "G");
        assert_eq!(render("Ab", &RenderingOptions::transposed(-2)), "Gb");
        assert_eq!(render("G#", &RenderingOptions::transposed(-2)), "F#");
        assert_eq!(render("C", &RenderingOptions::transposed(1)), "C#");
    }

    #[test]
    fn test_prefer_flat_override() {
        let flats = RenderingOptions {
            prefer_flat: Some(true),
            ..RenderingOptions::transposed(1)
        };
        assert_eq!(render("C/F", &flats), "Db/Gb");
        let sharps = RenderingOptions {
            prefer_flat: Some(false),
            ..RenderingOptions::default()
        };
        assert_eq!(render("Bbm", &sharps), "A#m");
    }

    #[test]
    fn test_h_notation_is_display_only() {
        let options = RenderingOptions { use_h: true, ..RenderingOptions::default() };
        assert_eq!(render("B7", &options), "H7");
        assert_eq!(render("G/B", &options), "G/H");
        assert_eq!(render("Bb", &options), "Bb");
        assert_eq!(render("A", &RenderingOptions { use_h: true, ..RenderingOptions::transposed(2) }), "H");
    }

    #[test]
    fn test_render_chords_passes_text_through() {
        let text = "Intro:\n  Am   G/B  \r\nI sang a song\n\n| C  x2 |";
        let out = render_chords(text, &RenderingOptions::default());
        assert_eq!(out, text);
    }

    #[test]
    fn test_render_chords_transposed_length_changes() {
        let out = render_chords("C   F\nsing\n", &RenderingOptions::transposed(1));
        assert_eq!(out, "C#   F#\nsing\n");
    }

    #[test]
    fn test_render_chords_with_tag_attributes() {
        let options = RenderingOptions {
            html_tag: Some("span class=\"chord\"".to_string()),
            ..RenderingOptions::default()
        };
        assert_eq!(
            render_chords("(Am)", &options),
            "(<span class=\"chord\">Am</span>)"
        );
    }

    #[test]
    fn test_unique_chord_names_after_transposition() {
        // A# and Bb collapse once rendered with the same spelling
        let options = RenderingOptions { prefer_flat: Some(true), ..RenderingOptions::default() };
        let names = unique_chord_names("A# C\nBb C G", &options);
        assert_eq!(names, vec!["Bb", "C", "G"]);
    }

    #[test]
    fn test_render_key() {
        assert_eq!(render_key(Tone::A, &RenderingOptions::default()), "Am");
        let options = RenderingOptions { use_h: true, ..RenderingOptions::transposed(2) };
        assert_eq!(render_key(Tone::A, &options), "Hm");
    }

    #[test]
    fn test_options_from_yaml() {
        let options = RenderingOptions::from_yaml("transpose: -2\nuse-h: true\nhtml-tag: span\n").unwrap();
        assert_eq!(options.transpose_semitones, -2);
        assert!(options.use_h);
        assert_eq!(options.prefer_flat, None);
        assert_eq!(options.html_tag.as_deref(), Some("span"));

        assert_eq!(RenderingOptions::from_yaml("{}").unwrap(), RenderingOptions::default());
        assert!(matches!(
            RenderingOptions::from_yaml("transpose: lots"),
            Err(ParseError::MetadataError(_))
        ));
    }
}
