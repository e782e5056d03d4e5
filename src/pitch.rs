//! # Pitch Primitives
//!
//! Conversions between note names, pitch classes, and MIDI note numbers.
//!
//! ## Conventions
//! - A **pitch class** is a semitone class 0..=11 with C = 0.
//! - A **note** is a MIDI-style `u8`: `note = pitch_class + 12 * (octave + 1)`,
//!   so middle C (C4) is 60.
//! - Names are spelled with sharps by default. Flat spellings are accepted on input
//!   and offered as enharmonic alternatives.
//!
//! ## Example
//! ```rust
//! use chordwise::pitch::{is_black_key, note_name, parse_note, PitchClass};
//!
//! assert_eq!(note_name(61), "C#4");
//! assert_eq!(parse_note("Db4").unwrap(), 61);
//! assert!(is_black_key(61));
//! assert_eq!(PitchClass::from_name("bb").unwrap(), PitchClass::new(10));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TheoryError;

const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];
const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// A semitone class, 0 = C through 11 = B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PitchClass(u8);

impl PitchClass {
    /// Build a pitch class from any semitone count, wrapping modulo 12.
    pub fn new(semitones: u8) -> Self {
        Self(semitones % 12)
    }

    /// Parse a root name like `C`, `f#`, `Bb`.
    ///
    /// Letters are case-insensitive. Accepts `#`/`♯` and `b`/`♭` as a single
    /// accidental, so `Cb` is pitch class 11 and `E#` is 5.
    pub fn from_name(name: &str) -> Result<Self, TheoryError> {
        let trimmed = name.trim();
        let mut chars = trimmed.chars();
        let letter = chars
            .next()
            .ok_or_else(|| TheoryError::InvalidNoteName(name.to_string()))?;

        let base: i8 = match letter.to_ascii_uppercase() {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return Err(TheoryError::InvalidNoteName(name.to_string())),
        };

        let rest: String = chars.collect();
        let accidental: i8 = match rest.to_lowercase().as_str() {
            "" => 0,
            "#" | "♯" => 1,
            "b" | "♭" => -1,
            _ => return Err(TheoryError::InvalidNoteName(name.to_string())),
        };

        Ok(Self((base + accidental).rem_euclid(12) as u8))
    }

    /// Semitone value 0..=11.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Sharp spelling (`C#`).
    pub fn name(self) -> &'static str {
        SHARP_NAMES[self.0 as usize]
    }

    /// Flat spelling (`Db`). Same as [`name`](Self::name) for naturals.
    pub fn flat_name(self) -> &'static str {
        FLAT_NAMES[self.0 as usize]
    }

    /// Every distinct spelling of this pitch class, sharp spelling first.
    pub fn spellings(self) -> Vec<&'static str> {
        if self.name() == self.flat_name() {
            vec![self.name()]
        } else {
            vec![self.name(), self.flat_name()]
        }
    }

    /// The pitch class `semitones` above this one.
    pub fn transpose(self, semitones: u8) -> Self {
        Self::new(self.0 + semitones % 12)
    }

    /// MIDI note of this pitch class in the given octave (C4 = 60).
    pub fn in_octave(self, octave: i8) -> Result<u8, TheoryError> {
        let note = self.0 as i16 + 12 * (octave as i16 + 1);
        u8::try_from(note)
            .ok()
            .filter(|n| *n <= 127)
            .ok_or_else(|| TheoryError::InvalidNoteName(format!("{}{}", self.name(), octave)))
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for PitchClass {
    type Error = TheoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_name(&value)
    }
}

impl From<PitchClass> for String {
    fn from(pc: PitchClass) -> Self {
        pc.name().to_string()
    }
}

/// Pitch class of a MIDI note.
pub fn pitch_class_of(note: u8) -> PitchClass {
    PitchClass::new(note)
}

/// Octave number of a MIDI note (60 is octave 4).
pub fn octave_of(note: u8) -> i8 {
    (note / 12) as i8 - 1
}

/// Sharp-spelled name with octave, e.g. `60 -> "C4"`, `70 -> "A#4"`.
pub fn note_name(note: u8) -> String {
    format!("{}{}", pitch_class_of(note).name(), octave_of(note))
}

/// True for the five black keys of each octave (C#, D#, F#, G#, A#).
pub fn is_black_key(note: u8) -> bool {
    matches!(note % 12, 1 | 3 | 6 | 8 | 10)
}

/// Parse a note with octave, e.g. `"C#4"`, `"bb3"`, `"C-1"`.
pub fn parse_note(text: &str) -> Result<u8, TheoryError> {
    let trimmed = text.trim();
    let split = trimmed
        .char_indices()
        .skip(1)
        .find(|(_, c)| c.is_ascii_digit() || *c == '-')
        .map(|(i, _)| i)
        .ok_or_else(|| TheoryError::InvalidNoteName(text.to_string()))?;

    let (name, octave) = trimmed.split_at(split);
    let pitch_class =
        PitchClass::from_name(name).map_err(|_| TheoryError::InvalidNoteName(text.to_string()))?;
    let octave: i8 = octave
        .parse()
        .map_err(|_| TheoryError::InvalidNoteName(text.to_string()))?;

    pitch_class
        .in_octave(octave)
        .map_err(|_| TheoryError::InvalidNoteName(text.to_string()))
}
