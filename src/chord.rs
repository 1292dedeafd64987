//! Chord values and their positions in text.

use crate::quality::ChordType;
use crate::tone::Tone;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// A chord symbol: root tone, quality and optional bass tone (`C/G`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chord {
    pub tone: Tone,
    pub chord_type: ChordType,
    pub bass: Option<Tone>,
}

impl Chord {
    pub fn new(tone: Tone, chord_type: ChordType) -> Self {
        Self { tone, chord_type, bass: None }
    }

    pub fn with_bass(tone: Tone, chord_type: ChordType, bass: Tone) -> Self {
        Self { tone, chord_type, bass: Some(bass) }
    }

    /// Parse a whole string as one chord. Trailing text makes it fail.
    ///
    /// ```
    /// use chordsheet::{Chord, ChordType, Tone};
    ///
    /// let chord = Chord::parse("Am7/G").unwrap();
    /// assert_eq!(chord.tone, Tone::A);
    /// assert_eq!(chord.chord_type, ChordType::Minor7);
    /// assert_eq!(chord.bass, Some(Tone::G));
    /// assert!(Chord::parse("Am7 and more").is_none());
    /// ```
    pub fn parse(token: &str) -> Option<Chord> {
        let len = token.chars().count();
        crate::parser::parse_leading_chord(token, 0, len)
            .filter(|m| m.end == len)
            .map(|m| m.chord)
    }

    /// Shift root and bass by `steps` semitones.
    pub fn transpose(&self, steps: i32, prefer_flat: bool) -> Chord {
        Chord {
            tone: self.tone.transpose(steps, prefer_flat),
            chord_type: self.chord_type,
            bass: self.bass.map(|b| b.transpose(steps, prefer_flat)),
        }
    }
}

impl std::fmt::Display for Chord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.tone, self.chord_type.suffix())?;
        if let Some(bass) = self.bass {
            write!(f, "/{}", bass)?;
        }
        Ok(())
    }
}

// Serialized in display form so JSON consumers get "F#m7/E", not indices.
impl Serialize for Chord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Chord", 4)?;
        state.serialize_field("name", &self.to_string())?;
        state.serialize_field("tone", self.tone.name(false))?;
        state.serialize_field("suffix", self.chord_type.suffix())?;
        state.serialize_field("bass", &self.bass.map(|b| b.name(false)))?;
        state.end()
    }
}

/// A chord found in text, spanning characters `[start, end)`.
///
/// Offsets count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordOccurrence {
    pub chord: Chord,
    pub start: usize,
    pub end: usize,
}

impl ChordOccurrence {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Same chord moved by `offset` characters
    pub fn shifted(&self, offset: usize) -> Self {
        Self {
            chord: self.chord,
            start: self.start + offset,
            end: self.end + offset,
        }
    }
}
