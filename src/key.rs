//! # Key Detection
//!
//! Guesses the key of a chord progression, reported as a minor key center
//! (the relative major is three semitones up).
//!
//! ## Scoring
//! Each of the 12 candidate keys has a [`KeyPattern`]: tones that are
//! expected as major chords and as minor chords in that key, with a weight.
//! For A minor:
//!
//! ```text
//! minor chords:  A (4, key tone)    D (2, IV)    E (1, harmonic)
//! major chords:  C (3, parallel)    F (2)        G (2)    E (1, harmonic V)
//! ```
//!
//! For every chord of class major (`""`, `maj7`) or minor (`m`, `m7`), each
//! candidate gains the weight of the matching entry, or loses 1 when the
//! chord's tone is not in the relevant list. Other qualities (`7`, `dim`,
//! `aug9`, ...) do not affect any score.
//!
//! The best candidate must score above 0. Candidates are scanned from `A`
//! upward by semitone index and only a strictly higher score replaces the
//! current best, so ties go to the lowest index.
//!
//! The other 11 patterns are derived from the A minor one by transposition.

use crate::chord::Chord;
use crate::quality::Mode;
use crate::tone::{Tone, SEMITONES};
use lazy_static::lazy_static;
use log::{debug, trace};

const KEY_TONE: i32 = 4;
const PARALLEL_MAJOR: i32 = 3;
const STANDARD: i32 = 2;
const ALTERNATIVE_HARMONIC: i32 = 1;
const MISMATCH: i32 = -1;

/// Semitone index of the minor keys written with flats: D, G, C, F, Bb, Eb
const FLAT_MINOR_KEYS: [u8; 6] = [5, 10, 3, 8, 1, 6];

/// A tone expected in a key, with its score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneWeight {
    pub tone: Tone,
    pub score: i32,
}

/// Expected chords of one minor key center
#[derive(Debug, Clone, PartialEq)]
pub struct KeyPattern {
    pub key: Tone,
    pub major_matches: Vec<ToneWeight>,
    pub minor_matches: Vec<ToneWeight>,
}

impl KeyPattern {
    fn a_minor() -> Self {
        let weight = |tone, score| ToneWeight { tone, score };
        Self {
            key: Tone::A,
            major_matches: vec![
                weight(Tone::C, PARALLEL_MAJOR),
                weight(Tone::F, STANDARD),
                weight(Tone::G, STANDARD),
                weight(Tone::E, ALTERNATIVE_HARMONIC),
            ],
            minor_matches: vec![
                weight(Tone::A, KEY_TONE),
                weight(Tone::D, STANDARD),
                weight(Tone::E, ALTERNATIVE_HARMONIC),
            ],
        }
    }

    fn transpose(&self, steps: i32) -> Self {
        let shift = |matches: &[ToneWeight]| {
            matches
                .iter()
                .map(|m| ToneWeight {
                    tone: m.tone.transpose(steps, false),
                    score: m.score,
                })
                .collect::<Vec<_>>()
        };
        Self {
            key: self.key.transpose(steps, false),
            major_matches: shift(&self.major_matches),
            minor_matches: shift(&self.minor_matches),
        }
    }

    /// Score change for one chord against this key
    fn score(&self, tone: Tone, mode: Mode) -> i32 {
        let matches = match mode {
            Mode::Major => &self.major_matches,
            Mode::Minor => &self.minor_matches,
        };
        matches
            .iter()
            .find(|m| m.tone == tone)
            .map_or(MISMATCH, |m| m.score)
    }
}

/// Build the 12 key patterns, index `i` centered on semitone `i`.
pub fn build_key_patterns() -> Vec<KeyPattern> {
    let canonical = KeyPattern::a_minor();
    (0..SEMITONES as i32)
        .map(|steps| canonical.transpose(steps))
        .collect()
}

lazy_static! {
    static ref KEY_PATTERNS: Vec<KeyPattern> = build_key_patterns();
}

/// The shared pattern table, built on first use
pub fn key_patterns() -> &'static [KeyPattern] {
    &KEY_PATTERNS
}

/// Detect the key of a chord sequence as a minor key center.
///
/// ```
/// use chordsheet::{detect_key_as_minor, Chord, Tone};
///
/// let chords: Vec<Chord> = ["Am", "Dm", "G", "C"]
///     .iter()
///     .filter_map(|c| Chord::parse(c))
///     .collect();
/// assert_eq!(detect_key_as_minor(&chords), Some(Tone::A));
/// assert_eq!(detect_key_as_minor(&[]), None);
/// ```
pub fn detect_key_as_minor(chords: &[Chord]) -> Option<Tone> {
    let patterns = key_patterns();
    let mut scores = [0i32; SEMITONES as usize];

    for chord in chords {
        let Some(mode) = chord.chord_type.mode() else {
            continue;
        };
        for (score, pattern) in scores.iter_mut().zip(patterns) {
            *score += pattern.score(chord.tone, mode);
        }
    }

    let mut result = None;
    let mut result_weight = 0;
    for (score, pattern) in scores.iter().zip(patterns) {
        trace!("Key {}m scored {}", pattern.key, score);
        if *score > result_weight {
            result_weight = *score;
            result = Some(pattern.key);
        }
    }

    match result {
        Some(key) => debug!("Detected key {}m (score {})", key, result_weight),
        None => debug!("No key detected from {} chords", chords.len()),
    }
    result
}

/// Major key sharing the signature of a minor key
pub fn relative_major(minor_key: Tone) -> Tone {
    minor_key.transpose(3, key_prefers_flat(minor_key))
}

/// Whether a minor key's signature is written with flats.
///
/// Eb minor (six flats) is preferred over D# minor (six sharps).
pub fn key_prefers_flat(minor_key: Tone) -> bool {
    FLAT_MINOR_KEYS.contains(&minor_key.semitone_index())
}
