//! # Song Sheets
//!
//! A song is plain text with an optional YAML frontmatter block:
//!
//! ```text
//! ---
//! title: Vodka
//! artist: Someone
//! key: Am
//! transpose: 2
//! notation: german
//! ---
//! Am        Dm
//! words of the song
//! ```
//!
//! The frontmatter must open on the first line. Everything after the
//! closing `---` line is the body, kept byte for byte.
//!
//! Frontmatter values combine with caller options:
//! - `transpose` is added to the caller's transposition
//! - `notation` (`german` or `english`) sets `H`/`B` display
//! - `key` replaces key detection; a major key is read as its relative minor
//!
//! When a song is transposed and the caller has no spelling preference, the
//! spelling follows the transposed key's signature (flats for D, G, C, F,
//! Bb and Eb minor).

use crate::chord::{Chord, ChordOccurrence};
use crate::error::ParseError;
use crate::key::{detect_key_as_minor, key_prefers_flat};
use crate::parser::parse_chords;
use crate::quality::ChordType;
use crate::render::{render_chords, render_key, unique_chord_names, RenderingOptions};
use crate::tone::Tone;
use log::debug;
use serde::Deserialize;
use std::str::FromStr;

/// Tone-letter convention for B natural
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    English, // B
    German,  // H
}

impl FromStr for Notation {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "b" => Ok(Notation::English),
            "german" | "h" => Ok(Notation::German),
            _ => Err(ParseError::MetadataError(format!("Invalid notation: {}", s))),
        }
    }
}

/// Song frontmatter after validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SongMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    /// Minor key center
    pub key: Option<Tone>,
    pub transpose: i32,
    pub notation: Option<Notation>,
}

/// Raw frontmatter for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
struct RawMetadata {
    title: Option<String>,
    artist: Option<String>,
    key: Option<String>,
    transpose: Option<i32>,
    notation: Option<String>,
}

/// A parsed song: metadata plus body text
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    pub metadata: SongMetadata,
    pub body: String,
}

impl Song {
    /// Split off and validate the frontmatter.
    ///
    /// ```
    /// use chordsheet::{Song, Tone};
    ///
    /// let song = Song::parse("---\ntitle: Test\nkey: C\n---\nAm G\n").unwrap();
    /// assert_eq!(song.metadata.title.as_deref(), Some("Test"));
    /// assert_eq!(song.metadata.key, Some(Tone::A));
    /// assert_eq!(song.body, "Am G\n");
    /// ```
    pub fn parse(source: &str) -> Result<Song, ParseError> {
        let (frontmatter, body) = extract_frontmatter(source);
        let metadata = match frontmatter {
            Some(content) => parse_metadata(content)?,
            None => SongMetadata::default(),
        };
        Ok(Song {
            metadata,
            body: body.to_string(),
        })
    }

    /// Chords of the body, offsets relative to the body
    pub fn chords(&self) -> Vec<ChordOccurrence> {
        parse_chords(&self.body)
    }

    /// Key from the frontmatter, else detected from the chords
    pub fn detect_key(&self) -> Option<Tone> {
        self.metadata.key.or_else(|| {
            let chords: Vec<Chord> = self.chords().iter().map(|o| o.chord).collect();
            detect_key_as_minor(&chords)
        })
    }

    /// Caller options combined with the frontmatter
    pub fn rendering_options(&self, base: &RenderingOptions) -> RenderingOptions {
        let mut options = base.clone();
        options.transpose_semitones += self.metadata.transpose;
        if let Some(notation) = self.metadata.notation {
            options.use_h = notation == Notation::German;
        }
        if options.prefer_flat.is_none() && options.transpose_semitones != 0 {
            if let Some(key) = self.detect_key() {
                let target = key.transpose(options.transpose_semitones, false);
                options.prefer_flat = Some(key_prefers_flat(target));
                debug!(
                    "Spelling for target key {}m: {}",
                    target,
                    if key_prefers_flat(target) { "flats" } else { "sharps" }
                );
            }
        }
        options
    }

    /// Body with chords rendered
    pub fn render(&self, base: &RenderingOptions) -> String {
        render_chords(&self.body, &self.rendering_options(base))
    }

    /// Distinct rendered chord names in first-seen order
    pub fn unique_chord_names(&self, base: &RenderingOptions) -> Vec<String> {
        unique_chord_names(&self.body, &self.rendering_options(base))
    }

    /// Display name of the (transposed) key, e.g. `"Hm"`
    pub fn key_name(&self, base: &RenderingOptions) -> Option<String> {
        let options = self.rendering_options(base);
        self.detect_key().map(|key| render_key(key, &options))
    }
}

/// Split `source` into frontmatter content and body.
fn extract_frontmatter(source: &str) -> (Option<&str>, &str) {
    let mut lines = source.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return (None, source);
    };
    if first.trim() != "---" {
        return (None, source);
    }

    let content_start = first.len();
    let mut pos = content_start;
    for line in lines {
        if line.trim() == "---" {
            return (Some(&source[content_start..pos]), &source[pos + line.len()..]);
        }
        pos += line.len();
    }
    (None, source)
}

fn parse_metadata(content: &str) -> Result<SongMetadata, ParseError> {
    // An empty block deserializes as YAML null
    let raw: RawMetadata = if content.trim().is_empty() {
        RawMetadata::default()
    } else {
        serde_yaml::from_str(content).map_err(|e| ParseError::MetadataError(e.to_string()))?
    };

    let key = raw.key.as_deref().map(parse_key).transpose()?;

    let notation: Option<Notation> = raw.notation.as_deref().map(str::parse).transpose()?;

    Ok(SongMetadata {
        title: raw.title,
        artist: raw.artist,
        key,
        transpose: raw.transpose.unwrap_or(0),
        notation,
    })
}

/// Read a key like `"Am"`, `"F#m"` or `"C"` as a minor key center.
fn parse_key(s: &str) -> Result<Tone, ParseError> {
    let invalid = || ParseError::MetadataError(format!("Invalid key: {}", s));
    let chord = Chord::parse(s.trim()).ok_or_else(invalid)?;
    if chord.bass.is_some() {
        return Err(invalid());
    }
    match chord.chord_type {
        ChordType::Minor => Ok(chord.tone),
        ChordType::Major => Ok(chord.tone.transpose(-3, chord.tone.is_flat())),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_frontmatter() {
        let song = Song::parse("Am G\nla la").unwrap();
        assert_eq!(song.metadata, SongMetadata::default());
        assert_eq!(song.body, "Am G\nla la");
    }

    #[test]
    fn test_frontmatter_fields() {
        let source = "---\ntitle: Test Song\nartist: Band\nkey: F#m\ntranspose: -1\nnotation: german\n---\nF#m D\n";
        let song = Song::parse(source).unwrap();
        assert_eq!(song.metadata.title.as_deref(), Some("Test Song"));
        assert_eq!(song.metadata.artist.as_deref(), Some("Band"));
        assert_eq!(song.metadata.key.map(|k| k.semitone_index()), Some(9));
        assert_eq!(song.metadata.transpose, -1);
        assert_eq!(song.metadata.notation, Some(Notation::German));
        assert_eq!(song.body, "F#m D\n");
    }

    #[test]
    fn test_frontmatter_must_be_first() {
        let source = "Am\n---\ntitle: x\n---\n";
        let song = Song::parse(source).unwrap();
        assert_eq!(song.metadata.title, None);
        assert_eq!(song.body, source);
    }

    #[test]
    fn test_unclosed_frontmatter_is_body() {
        let song = Song::parse("---\ntitle: x\nAm").unwrap();
        assert_eq!(song.body, "---\ntitle: x\nAm");
    }

    #[test]
    fn test_empty_frontmatter() {
        let song = Song::parse("---\n---\nC").unwrap();
        assert_eq!(song.metadata, SongMetadata::default());
        assert_eq!(song.body, "C");
    }

    #[test]
    fn test_invalid_metadata() {
        assert!(matches!(
            Song::parse("---\ntranspose: up\n---\nC"),
            Err(ParseError::MetadataError(_))
        ));
        assert!(matches!(
            Song::parse("---\nkey: Xm\n---\nC"),
            Err(ParseError::MetadataError(_))
        ));
        assert!(matches!(
            Song::parse("---\nkey: Cdim\n---\nC"),
            Err(ParseError::MetadataError(_))
        ));
        assert!(matches!(
            Song::parse("---\nnotation: solfege\n---\nC"),
            Err(ParseError::MetadataError(_))
        ));
    }

    #[test]
    fn test_notation_from_str() {
        assert_eq!("German".parse::<Notation>(), Ok(Notation::German));
        assert_eq!(" h ".parse::<Notation>(), Ok(Notation::German));
        assert_eq!("english".parse::<Notation>(), Ok(Notation::English));
        assert_eq!(
            "solfege".parse::<Notation>(),
            Err(ParseError::MetadataError("Invalid notation: solfege".to_string()))
        );
    }

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("Am"), Ok(Tone::A));
        assert_eq!(parse_key("C"), Ok(Tone::A));
        assert_eq!(parse_key("G"), Ok(Tone::E));
        assert_eq!(parse_key("Bb").map(|k| k.to_string()), Ok("G".to_string()));
        assert_eq!(parse_key("Ebm").map(|k| k.to_string()), Ok("Eb".to_string()));
        assert!(parse_key("Am/G").is_err());
    }

    #[test]
    fn test_detect_key_prefers_frontmatter() {
        let song = Song::parse("---\nkey: Em\n---\nAm Dm G C").unwrap();
        assert_eq!(song.detect_key(), Some(Tone::E));
        let song = Song::parse("Am Dm G C").unwrap();
        assert_eq!(song.detect_key(), Some(Tone::A));
    }

    #[test]
    fn test_rendering_options_merge() {
        let song = Song::parse("---\ntranspose: 2\nnotation: german\n---\nAm Dm E").unwrap();
        let options = song.rendering_options(&RenderingOptions::transposed(1));
        assert_eq!(options.transpose_semitones, 3);
        assert!(options.use_h);
        // A minor up 3 is C minor, written with flats
        assert_eq!(options.prefer_flat, Some(true));
        assert_eq!(song.render(&RenderingOptions::transposed(1)), "Cm Fm G");
    }

    #[test]
    fn test_untransposed_song_keeps_spelling() {
        let song = Song::parse("Am Bb F E").unwrap();
        let options = song.rendering_options(&RenderingOptions::default());
        assert_eq!(options.prefer_flat, None);
        assert_eq!(song.render(&RenderingOptions::default()), "Am Bb F E");
    }

    #[test]
    fn test_key_name_follows_transposition() {
        let song = Song::parse("---\nnotation: german\n---\nAm Dm G C").unwrap();
        assert_eq!(song.key_name(&RenderingOptions::transposed(2)).as_deref(), Some("Hm"));
        assert_eq!(Song::parse("no chords here").unwrap().key_name(&RenderingOptions::default()), None);
    }
}
