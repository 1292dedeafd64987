//! # Tone Model
//!
//! The 12 pitch classes used as chord roots and bass notes.
//!
//! Semitone indices are counted from `A`:
//!
//! ```text
//! 0=A  1=A#/Bb  2=B  3=C  4=C#/Db  5=D  6=D#/Eb  7=E  8=F  9=F#/Gb  10=G  11=G#/Ab
//! ```
//!
//! A [`Tone`] also remembers whether it was spelled with a flat, so that a
//! transposed song keeps its flat spelling. Equality and hashing ignore the
//! spelling: `A#` and `Bb` are the same tone.

use crate::error::ParseError;
use std::hash::{Hash, Hasher};

/// Number of pitch classes in an octave
pub const SEMITONES: u8 = 12;

const SHARP_NAMES: [&str; 12] = [
    "A", "A#", "B", "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#",
];

const FLAT_NAMES: [&str; 12] = [
    "A", "Bb", "B", "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab",
];

/// Semitone index of B natural, displayed as `H` in German notation
const B_NATURAL: u8 = 2;

/// Accidental written directly after a tone letter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accidental {
    Sharp, // #
    Flat,  // b
}

impl Accidental {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Accidental::Sharp),
            'b' => Some(Accidental::Flat),
            _ => None,
        }
    }
}

/// A pitch class with a spelling preference.
#[derive(Debug, Clone, Copy, Eq)]
pub struct Tone {
    index: u8,
    flat: bool,
}

impl Tone {
    pub const A: Tone = Tone::natural(0);
    pub const B: Tone = Tone::natural(2);
    pub const C: Tone = Tone::natural(3);
    pub const D: Tone = Tone::natural(5);
    pub const E: Tone = Tone::natural(7);
    pub const F: Tone = Tone::natural(8);
    pub const G: Tone = Tone::natural(10);

    const fn natural(index: u8) -> Self {
        Self { index, flat: false }
    }

    /// Build a tone from a semitone index (taken mod 12) and a spelling.
    pub fn from_index(index: i32, prefer_flat: bool) -> Self {
        Self {
            index: index.rem_euclid(SEMITONES as i32) as u8,
            flat: prefer_flat,
        }
    }

    /// Build a tone from a letter `A`–`G` and an optional accidental.
    ///
    /// ```
    /// use chordsheet::{Accidental, Tone};
    ///
    /// let b_flat = Tone::from_letter_and_accidental('B', Some(Accidental::Flat)).unwrap();
    /// assert_eq!(b_flat.semitone_index(), 1);
    /// assert_eq!(b_flat.name(false), "Bb");
    /// assert!(Tone::from_letter_and_accidental('H', None).is_err());
    /// ```
    pub fn from_letter_and_accidental(
        letter: char,
        accidental: Option<Accidental>,
    ) -> Result<Self, ParseError> {
        let base: i32 = match letter {
            'A' => 0,
            'B' => 2,
            'C' => 3,
            'D' => 5,
            'E' => 7,
            'F' => 8,
            'G' => 10,
            _ => return Err(ParseError::UnknownTone { letter }),
        };
        let (shift, flat) = match accidental {
            Some(Accidental::Sharp) => (1, false),
            Some(Accidental::Flat) => (-1, true),
            None => (0, false),
        };
        Ok(Self::from_index(base + shift, flat))
    }

    /// Whether `c` can start a tone
    pub fn is_tone_letter(c: char) -> bool {
        matches!(c, 'A'..='G')
    }

    pub fn semitone_index(&self) -> u8 {
        self.index
    }

    /// True if the tone was spelled (or requested) with a flat
    pub fn is_flat(&self) -> bool {
        self.flat
    }

    /// Shift by `steps` semitones (negative steps go down) and re-spell.
    pub fn transpose(&self, steps: i32, prefer_flat: bool) -> Tone {
        Self::from_index(self.index as i32 + steps, prefer_flat)
    }

    /// Semitones to go up from `self` to reach `other`, in `[0, 11]`
    pub fn interval_to(&self, other: Tone) -> i32 {
        (other.index as i32 - self.index as i32).rem_euclid(SEMITONES as i32)
    }

    /// Display name. `use_h` selects German/Slavic notation for B natural.
    pub fn name(&self, use_h: bool) -> &'static str {
        if use_h && self.index == B_NATURAL {
            return "H";
        }
        let names = if self.flat { &FLAT_NAMES } else { &SHARP_NAMES };
        names[self.index as usize]
    }

    /// All 12 tones in index order, sharp-spelled
    pub fn all() -> impl Iterator<Item = Tone> {
        (0..SEMITONES).map(Tone::natural)
    }
}

impl PartialEq for Tone {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Hash for Tone {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(letter: char, accidental: Option<Accidental>) -> Tone {
        Tone::from_letter_and_accidental(letter, accidental).unwrap()
    }

    #[test]
    fn test_letters_map_to_indices() {
        assert_eq!(tone('A', None).semitone_index(), 0);
        assert_eq!(tone('C', None).semitone_index(), 3);
        assert_eq!(tone('G', Some(Accidental::Sharp)).semitone_index(), 11);
        assert_eq!(tone('A', Some(Accidental::Flat)).semitone_index(), 11);
        // Wraps below A
        assert_eq!(tone('C', Some(Accidental::Flat)), Tone::B);
        assert_eq!(tone('E', Some(Accidental::Sharp)), Tone::F);
    }

    #[test]
    fn test_unknown_letter() {
        assert_eq!(
            Tone::from_letter_and_accidental('H', None),
            Err(ParseError::UnknownTone { letter: 'H' })
        );
        assert!(Tone::from_letter_and_accidental('a', None).is_err());
    }

    #[test]
    fn test_equality_ignores_spelling() {
        let a_sharp = tone('A', Some(Accidental::Sharp));
        let b_flat = tone('B', Some(Accidental::Flat));
        assert_eq!(a_sharp, b_flat);
        assert_eq!(a_sharp.name(false), "A#");
        assert_eq!(b_flat.name(false), "Bb");
    }

    #[test]
    fn test_every_index_has_both_spellings() {
        for i in 0..12 {
            let sharp = Tone::from_index(i, false);
            let flat = Tone::from_index(i, true);
            assert!(!sharp.name(false).contains('b'));
            assert!(!flat.name(false).contains('#'));
            assert_eq!(sharp, flat);
        }
    }

    #[test]
    fn test_transpose_negative_steps() {
        assert_eq!(Tone::A.transpose(-1, false), tone('G', Some(Accidental::Sharp)));
        assert_eq!(Tone::C.transpose(-15, false), Tone::A);
        assert_eq!(Tone::C.transpose(1, true).name(false), "Db");
        assert_eq!(Tone::C.transpose(1, false).name(false), "C#");
    }

    #[test]
    fn test_mod_12_closure() {
        for t in Tone::all() {
            for n in -24..=24 {
                let expected = (t.semitone_index() as i32 + n).rem_euclid(12) as u8;
                assert_eq!(t.transpose(n, false).semitone_index(), expected);
                assert_eq!(t.transpose(n, true).semitone_index(), expected);
            }
        }
    }

    #[test]
    fn test_h_notation() {
        assert_eq!(Tone::B.name(true), "H");
        assert_eq!(Tone::B.name(false), "B");
        // Only B natural changes
        assert_eq!(tone('B', Some(Accidental::Flat)).name(true), "Bb");
    }

    #[test]
    fn test_interval_to() {
        assert_eq!(Tone::A.interval_to(Tone::C), 3);
        assert_eq!(Tone::C.interval_to(Tone::A), 9);
        assert_eq!(Tone::E.interval_to(Tone::E), 0);
    }
}
