//! Chord qualities and their suffixes.
//!
//! Every [`ChordType`] has exactly one canonical suffix. The renderer writes
//! that suffix and the parser accepts it, so the two sets are the same by
//! construction. The parser additionally accepts a handful of long-form
//! aliases (`major`, `minor`, `min`, ...) that collapse onto a canonical type.

/// Harmonic quality of a chord beyond its root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordType {
    Major,
    Minor,
    Seventh,
    Minor7,
    Major7,
    Sixth,
    Minor6,
    SixNine,
    MinorSixNine,
    Ninth,
    Minor9,
    Major9,
    Eleventh,
    Minor11,
    Major11,
    Thirteenth,
    Minor13,
    Major13,
    Add9,
    MinorAdd9,
    Add2,
    Add4,
    Add11,
    MinorAdd11,
    Sus,
    Sus2,
    Sus4,
    SevenSus,
    SevenSus2,
    SevenSus4,
    NineSus4,
    Diminished,
    Diminished7,
    HalfDiminished,
    Augmented,
    Augmented7,
    Augmented9,
    Plus,
    SevenPlus,
    Power,
    MinorMajor7,
    MinorMajor9,
    SevenFlat5,
    SevenSharp5,
    SevenFlat9,
    SevenSharp9,
    SevenSharp11,
    NineFlat5,
    NineSharp5,
    NineSharp11,
    ThirteenFlat9,
    ThirteenSharp11,
    Major7Sharp5,
    Major7Flat5,
    Major7Sharp11,
    Minor7Sharp5,
    Minor7Flat9,
    Minor9Flat5,
    Two,
    Four,
}

/// Broad class used by key detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Major,
    Minor,
}

impl ChordType {
    pub const ALL: [ChordType; 60] = [
        ChordType::Major,
        ChordType::Minor,
        ChordType::Seventh,
        ChordType::Minor7,
        ChordType::Major7,
        ChordType::Sixth,
        ChordType::Minor6,
        ChordType::SixNine,
        ChordType::MinorSixNine,
        ChordType::Ninth,
        ChordType::Minor9,
        ChordType::Major9,
        ChordType::Eleventh,
        ChordType::Minor11,
        ChordType::Major11,
        ChordType::Thirteenth,
        ChordType::Minor13,
        ChordType::Major13,
        ChordType::Add9,
        ChordType::MinorAdd9,
        ChordType::Add2,
        ChordType::Add4,
        ChordType::Add11,
        ChordType::MinorAdd11,
        ChordType::Sus,
        ChordType::Sus2,
        ChordType::Sus4,
        ChordType::SevenSus,
        ChordType::SevenSus2,
        ChordType::SevenSus4,
        ChordType::NineSus4,
        ChordType::Diminished,
        ChordType::Diminished7,
        ChordType::HalfDiminished,
        ChordType::Augmented,
        ChordType::Augmented7,
        ChordType::Augmented9,
        ChordType::Plus,
        ChordType::SevenPlus,
        ChordType::Power,
        ChordType::MinorMajor7,
        ChordType::MinorMajor9,
        ChordType::SevenFlat5,
        ChordType::SevenSharp5,
        ChordType::SevenFlat9,
        ChordType::SevenSharp9,
        ChordType::SevenSharp11,
        ChordType::NineFlat5,
        ChordType::NineSharp5,
        ChordType::NineSharp11,
        ChordType::ThirteenFlat9,
        ChordType::ThirteenSharp11,
        ChordType::Major7Sharp5,
        ChordType::Major7Flat5,
        ChordType::Major7Sharp11,
        ChordType::Minor7Sharp5,
        ChordType::Minor7Flat9,
        ChordType::Minor9Flat5,
        ChordType::Two,
        ChordType::Four,
    ];

    /// Canonical suffix written after the root
    pub fn suffix(&self) -> &'static str {
        match self {
            ChordType::Major => "",
            ChordType::Minor => "m",
            ChordType::Seventh => "7",
            ChordType::Minor7 => "m7",
            ChordType::Major7 => "maj7",
            ChordType::Sixth => "6",
            ChordType::Minor6 => "m6",
            ChordType::SixNine => "69",
            ChordType::MinorSixNine => "m69",
            ChordType::Ninth => "9",
            ChordType::Minor9 => "m9",
            ChordType::Major9 => "maj9",
            ChordType::Eleventh => "11",
            ChordType::Minor11 => "m11",
            ChordType::Major11 => "maj11",
            ChordType::Thirteenth => "13",
            ChordType::Minor13 => "m13",
            ChordType::Major13 => "maj13",
            ChordType::Add9 => "add9",
            ChordType::MinorAdd9 => "madd9",
            ChordType::Add2 => "add2",
            ChordType::Add4 => "add4",
            ChordType::Add11 => "add11",
            ChordType::MinorAdd11 => "madd11",
            ChordType::Sus => "sus",
            ChordType::Sus2 => "sus2",
            ChordType::Sus4 => "sus4",
            ChordType::SevenSus => "7sus",
            ChordType::SevenSus2 => "7sus2",
            ChordType::SevenSus4 => "7sus4",
            ChordType::NineSus4 => "9sus4",
            ChordType::Diminished => "dim",
            ChordType::Diminished7 => "dim7",
            ChordType::HalfDiminished => "m7b5",
            ChordType::Augmented => "aug",
            ChordType::Augmented7 => "aug7",
            ChordType::Augmented9 => "aug9",
            ChordType::Plus => "+",
            ChordType::SevenPlus => "7+",
            ChordType::Power => "5",
            ChordType::MinorMajor7 => "mmaj7",
            ChordType::MinorMajor9 => "mmaj9",
            ChordType::SevenFlat5 => "7b5",
            ChordType::SevenSharp5 => "7#5",
            ChordType::SevenFlat9 => "7b9",
            ChordType::SevenSharp9 => "7#9",
            ChordType::SevenSharp11 => "7#11",
            ChordType::NineFlat5 => "9b5",
            ChordType::NineSharp5 => "9#5",
            ChordType::NineSharp11 => "9#11",
            ChordType::ThirteenFlat9 => "13b9",
            ChordType::ThirteenSharp11 => "13#11",
            ChordType::Major7Sharp5 => "maj7#5",
            ChordType::Major7Flat5 => "maj7b5",
            ChordType::Major7Sharp11 => "maj7#11",
            ChordType::Minor7Sharp5 => "m7#5",
            ChordType::Minor7Flat9 => "m7b9",
            ChordType::Minor9Flat5 => "m9b5",
            ChordType::Two => "2",
            ChordType::Four => "4",
        }
    }

    /// Major/minor class for key detection. Every other quality is
    /// invisible to the key detector.
    pub fn mode(&self) -> Option<Mode> {
        match self {
            ChordType::Major | ChordType::Major7 => Some(Mode::Major),
            ChordType::Minor | ChordType::Minor7 => Some(Mode::Minor),
            _ => None,
        }
    }

    /// Look up a suffix (canonical or alias) exactly.
    pub fn from_suffix(suffix: &str) -> Option<ChordType> {
        SUFFIX_ALIASES
            .iter()
            .find(|(alias, _)| *alias == suffix)
            .map(|(_, chord_type)| *chord_type)
            .or_else(|| Self::ALL.iter().copied().find(|t| t.suffix() == suffix))
    }
}

/// Long-form spellings accepted by the parser, never produced by the renderer
const SUFFIX_ALIASES: &[(&str, ChordType)] = &[
    ("maj", ChordType::Major),
    ("major", ChordType::Major),
    ("min", ChordType::Minor),
    ("minor", ChordType::Minor),
    ("min7", ChordType::Minor7),
    ("M7", ChordType::Major7),
];

/// All suffixes (aliases and canonical) that occur in `chars` at `pos`,
/// longest first. The empty major suffix always comes last.
pub fn suffixes_at(chars: &[char], pos: usize, to: usize) -> Vec<(ChordType, usize)> {
    let window = &chars[pos.min(to)..to];
    let mut found: Vec<(ChordType, usize)> = SUFFIX_ALIASES
        .iter()
        .copied()
        .chain(ChordType::ALL.iter().map(|t| (t.suffix(), *t)))
        .filter_map(|(suffix, chord_type)| {
            let len = suffix.chars().count();
            let matches = window.len() >= len && window.iter().zip(suffix.chars()).all(|(a, b)| *a == b);
            matches.then_some((chord_type, len))
        })
        .collect();
    // Stable: aliases stay ahead of canonical suffixes of equal length
    found.sort_by(|a, b| b.1.cmp(&a.1));
    found
}
