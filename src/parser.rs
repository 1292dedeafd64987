//! # Chord Parser
//!
//! Finds chord symbols in free-form song text.
//!
//! ## Token grammar
//! ```text
//! chord  = tone suffix? ("/" tone)?
//! tone   = "A".."G" ("#" | "b")? | "H"
//! suffix = longest match from the quality table (canonical or alias)
//! ```
//!
//! A match only counts when it ends on a word boundary: end of the scan
//! window, whitespace, punctuation, or the start of another chord. This keeps
//! `Am` out of `America`.
//!
//! `H` is read as B natural, so sheets written in German notation (and this
//! crate's own `use_h` output) parse back. It takes no accidental.
//!
//! ## Chord lines
//! Song text mixes lyric lines with chord lines. A line is read as a chord
//! line only when every whitespace-separated token is made of chords and
//! punctuation (`|`, parentheses, ...) or is a repeat marker (`x2`, `2x`).
//! A single ordinary word turns the whole line into lyrics, so
//! `"A little snail"` yields no chords.
//!
//! ## Offsets
//! All offsets are character indices, half-open `[start, end)`.
//! [`parse_chords`] re-bases them onto the whole text, counting each `\n`.

use crate::chord::{Chord, ChordOccurrence};
use crate::quality::suffixes_at;
use crate::tone::{Accidental, Tone};
use log::debug;

/// A chord recognized at a given position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordMatch {
    pub chord: Chord,
    pub start: usize,
    pub end: usize,
}

impl From<ChordMatch> for ChordOccurrence {
    fn from(m: ChordMatch) -> Self {
        ChordOccurrence {
            chord: m.chord,
            start: m.start,
            end: m.end,
        }
    }
}

/// Recognize the longest chord starting at character `from`, not reading
/// past character `to`.
///
/// # Examples
/// ```
/// use chordsheet::{parse_leading_chord, ChordType};
///
/// let m = parse_leading_chord("Dmajor", 0, 6).unwrap();
/// assert_eq!(m.chord.chord_type, ChordType::Major);
/// assert_eq!(m.end, 6);
///
/// assert!(parse_leading_chord("America", 0, 7).is_none());
/// ```
pub fn parse_leading_chord(text: &str, from: usize, to: usize) -> Option<ChordMatch> {
    let chars: Vec<char> = text.chars().collect();
    leading_chord(&chars, from, to.min(chars.len()))
}

/// German name of B natural
const GERMAN_B: char = 'H';

/// Whether `c` can start a chord in song text
fn is_root_letter(c: char) -> bool {
    Tone::is_tone_letter(c) || c == GERMAN_B
}

/// Read a tone at `pos`: letter plus optional accidental.
/// Returns the tone and the index after it, accidental first.
fn tones_at(chars: &[char], pos: usize, to: usize) -> Vec<(Tone, usize)> {
    let mut found = Vec::with_capacity(2);
    let Some(&letter) = chars.get(pos).filter(|_| pos < to) else {
        return found;
    };
    if letter == GERMAN_B {
        found.push((Tone::B, pos + 1));
        return found;
    }
    if !Tone::is_tone_letter(letter) {
        return found;
    }
    if pos + 1 < to {
        if let Some(accidental) = Accidental::from_char(chars[pos + 1]) {
            if let Ok(tone) = Tone::from_letter_and_accidental(letter, Some(accidental)) {
                found.push((tone, pos + 2));
            }
        }
    }
    if let Ok(tone) = Tone::from_letter_and_accidental(letter, None) {
        found.push((tone, pos + 1));
    }
    found
}

fn leading_chord(chars: &[char], from: usize, to: usize) -> Option<ChordMatch> {
    for (tone, after_tone) in tones_at(chars, from, to) {
        for (chord_type, len) in suffixes_at(chars, after_tone, to) {
            let end = after_tone + len;

            if end < to && chars[end] == '/' {
                for (bass, bass_end) in tones_at(chars, end + 1, to) {
                    if is_boundary(chars, bass_end, to) {
                        return Some(ChordMatch {
                            chord: Chord::with_bass(tone, chord_type, bass),
                            start: from,
                            end: bass_end,
                        });
                    }
                }
            }

            if is_boundary(chars, end, to) {
                return Some(ChordMatch {
                    chord: Chord::new(tone, chord_type),
                    start: from,
                    end,
                });
            }
        }
    }
    None
}

fn is_boundary(chars: &[char], pos: usize, to: usize) -> bool {
    if pos >= to {
        return true;
    }
    let c = chars[pos];
    if c.is_whitespace() {
        return true;
    }
    // The chord starting here is checked when the caller scans on
    if is_root_letter(c) {
        return true;
    }
    !c.is_alphanumeric() && c != '#'
}

/// `x2`, `2x`, `X4` and similar repeat markers
fn is_repeat_marker(token: &[char]) -> bool {
    let digits = |s: &[char]| !s.is_empty() && s.iter().all(|c| c.is_ascii_digit());
    match token {
        ['x' | 'X', rest @ ..] => digits(rest),
        [rest @ .., 'x' | 'X'] => digits(rest),
        _ => false,
    }
}

/// Chords of one token, or `None` if the token holds anything else
fn scan_token(chars: &[char], start: usize, end: usize) -> Option<Vec<ChordOccurrence>> {
    let mut found: Vec<ChordOccurrence> = Vec::new();
    let mut pos = start;
    while pos < end {
        let c = chars[pos];
        if is_root_letter(c) {
            let m = leading_chord(chars, pos, end)?;
            found.push(m.into());
            pos = m.end;
        } else if c.is_alphanumeric() {
            return None;
        } else {
            pos += 1;
        }
    }
    Some(found)
}

fn scan_line(chars: &[char]) -> Vec<ChordOccurrence> {
    let mut found = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        if chars[pos].is_whitespace() {
            pos += 1;
            continue;
        }
        let token_end = chars[pos..]
            .iter()
            .position(|c| c.is_whitespace())
            .map_or(chars.len(), |n| pos + n);

        if !is_repeat_marker(&chars[pos..token_end]) {
            match scan_token(chars, pos, token_end) {
                Some(chords) => found.extend(chords),
                None => {
                    debug!(
                        "Line read as lyrics at token '{}'",
                        chars[pos..token_end].iter().collect::<String>()
                    );
                    return Vec::new();
                }
            }
        }
        pos = token_end;
    }

    found
}

/// All chords of a single line, or nothing if the line is lyrics.
///
/// ```
/// use chordsheet::parse_chords_line;
///
/// assert_eq!(parse_chords_line("Am   G  | C").len(), 3);
/// assert!(parse_chords_line("A little snail").is_empty());
/// ```
pub fn parse_chords_line(line: &str) -> Vec<ChordOccurrence> {
    let chars: Vec<char> = line.chars().collect();
    scan_line(&chars)
}

/// All chords of a multi-line text, with offsets into the whole text.
///
/// ```
/// use chordsheet::parse_chords;
///
/// let chords = parse_chords(" Cm \n G7 ");
/// assert_eq!((chords[0].start, chords[0].end), (1, 3));
/// assert_eq!((chords[1].start, chords[1].end), (6, 8));
/// ```
pub fn parse_chords(text: &str) -> Vec<ChordOccurrence> {
    let mut found = Vec::new();
    let mut offset = 0;
    for line in text.split('\n') {
        let chars: Vec<char> = line.chars().collect();
        found.extend(scan_line(&chars).into_iter().map(|o| o.shifted(offset)));
        offset += chars.len() + 1;
    }
    found
}
