//! # chordsheet
//!
//! Chord handling for song lyrics and tabs: find chord symbols in free-form
//! text, transpose them, render them back (optionally as HTML markup, with
//! `H` or `B` notation) and guess the song's key.
//!
//! ## Pipeline
//! ```text
//! text ─ parse_chords ─┬─ render_chords ──────── display text
//!                      └─ detect_key_as_minor ── Option<Tone>
//! ```
//!
//! ## Example
//! ```rust
//! use chordsheet::{detect_key_as_minor, parse_chords, render_chords, RenderingOptions};
//!
//! let text = "Am       Dm\nSome words here\nG        C\n";
//!
//! let chords: Vec<_> = parse_chords(text).iter().map(|o| o.chord).collect();
//! assert_eq!(detect_key_as_minor(&chords).map(|k| k.to_string()), Some("A".to_string()));
//!
//! let options = RenderingOptions { use_h: true, ..RenderingOptions::transposed(2) };
//! assert_eq!(
//!     render_chords(text, &options),
//!     "Hm       Em\nSome words here\nA        D\n"
//! );
//! ```

pub mod chord;
pub mod error;
pub mod key;
pub mod parser;
pub mod quality;
pub mod render;
pub mod song;
pub mod tone;

pub use chord::{Chord, ChordOccurrence};
pub use error::*;
pub use key::{
    build_key_patterns, detect_key_as_minor, key_patterns, key_prefers_flat, relative_major,
    KeyPattern, ToneWeight,
};
pub use parser::{parse_chords, parse_chords_line, parse_leading_chord, ChordMatch};
pub use quality::{ChordType, Mode};
pub use render::{
    render_chord, render_chords, render_key, transpose, unique_chord_names, RenderingOptions,
};
pub use song::{Notation, Song, SongMetadata};
pub use tone::{Accidental, Tone};

/// Detect the key of a text, as a minor key center.
pub fn detect_key(text: &str) -> Option<Tone> {
    let chords: Vec<Chord> = parse_chords(text).iter().map(|o| o.chord).collect();
    detect_key_as_minor(&chords)
}
