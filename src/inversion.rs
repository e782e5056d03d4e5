//! # Inversion Model
//!
//! Voices a chord quality in a given inversion.
//!
//! An inversion rotates the chord tones so that a non-root tone sounds lowest:
//! - **Root position** - root in the bass (identity order)
//! - **First inversion** - third in the bass
//! - **Second inversion** - fifth in the bass
//! - **Third inversion** - seventh (or sixth) in the bass
//! - **Fourth inversion** - ninth in the bass
//!
//! Voicing is "close": each rotated tone is lifted by octaves until it sits above the
//! tone before it, so the result is strictly ascending and the bass is always the
//! tone chosen by `interval_order[0]`.
//!
//! ## Example
//! ```rust
//! use chordwise::catalog::lookup;
//! use chordwise::inversion::{apply, Inversion};
//!
//! let major = lookup("major").unwrap();
//! assert_eq!(apply(major, Inversion::Root, 60).unwrap(), vec![60, 64, 67]);
//! assert_eq!(apply(major, Inversion::First, 60).unwrap(), vec![64, 67, 72]);
//! assert_eq!(apply(major, Inversion::Second, 60).unwrap(), vec![67, 72, 76]);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::ChordQuality;
use crate::error::TheoryError;
use crate::pitch::PitchClass;

/// Which chord tone is in the bass.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Inversion {
    #[default]
    Root,
    First,
    Second,
    Third,
    Fourth,
}

impl Inversion {
    pub const ALL: [Inversion; 5] = [
        Inversion::Root,
        Inversion::First,
        Inversion::Second,
        Inversion::Third,
        Inversion::Fourth,
    ];

    /// Position of the bass tone in the quality's interval list.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Ordinal word used in verbose names (`"first"`). Empty for root position.
    pub fn ordinal(self) -> &'static str {
        match self {
            Inversion::Root => "",
            Inversion::First => "first",
            Inversion::Second => "second",
            Inversion::Third => "third",
            Inversion::Fourth => "fourth",
        }
    }

    /// Abbreviated ordinal (`"1st"`). Empty for root position.
    pub fn short_ordinal(self) -> &'static str {
        match self {
            Inversion::Root => "",
            Inversion::First => "1st",
            Inversion::Second => "2nd",
            Inversion::Third => "3rd",
            Inversion::Fourth => "4th",
        }
    }

    /// Tone order for a chord of `note_count` tones: a rotation starting at
    /// this inversion's index. Root position is the identity.
    pub fn interval_order(self, note_count: usize) -> Vec<usize> {
        (0..note_count)
            .map(|i| (i + self.index()) % note_count.max(1))
            .collect()
    }
}

impl fmt::Display for Inversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inversion::Root => f.write_str("root position"),
            other => write!(f, "{} inversion", other.ordinal()),
        }
    }
}

fn check_supported(quality: &ChordQuality, inversion: Inversion) -> Result<(), TheoryError> {
    if quality.supports(inversion) {
        Ok(())
    } else {
        Err(TheoryError::UnsupportedInversion {
            quality: quality.id.to_string(),
            inversion: inversion.to_string(),
        })
    }
}

/// Intervals of `quality` reordered for `inversion`, before octave lifting.
pub fn reordered_intervals(
    quality: &ChordQuality,
    inversion: Inversion,
) -> Result<Vec<u8>, TheoryError> {
    check_supported(quality, inversion)?;
    Ok(inversion
        .interval_order(quality.note_count())
        .into_iter()
        .map(|i| quality.intervals[i])
        .collect())
}

/// Close voicing of `quality` above `root_note`, unbounded by the MIDI range.
///
/// The generator voices chords here first and then moves them into the level's
/// pitch window, so an anchor near the top of the keyboard is still usable.
pub fn voice(
    quality: &ChordQuality,
    inversion: Inversion,
    root_note: u8,
) -> Result<Vec<i16>, TheoryError> {
    let mut voiced: Vec<i16> = Vec::with_capacity(quality.note_count());
    for interval in reordered_intervals(quality, inversion)? {
        let mut note = root_note as i16 + interval as i16;
        if let Some(&previous) = voiced.last() {
            while note <= previous {
                note += 12;
            }
        }
        voiced.push(note);
    }
    Ok(voiced)
}

/// Distance in semitones from the bass to the top note of a close voicing.
pub fn span(quality: &ChordQuality, inversion: Inversion) -> Result<u8, TheoryError> {
    let voiced = voice(quality, inversion, 0)?;
    Ok(match (voiced.first(), voiced.last()) {
        (Some(&low), Some(&high)) => (high - low) as u8,
        _ => 0,
    })
}

/// Voice `quality` above `root_note` in the given inversion.
///
/// Returns strictly ascending MIDI notes. Fails with `UnsupportedInversion` when the
/// quality has too few tones or cannot be inverted, and with `PitchWindowTooNarrow`
/// when the voicing would run past MIDI 127.
pub fn apply(
    quality: &ChordQuality,
    inversion: Inversion,
    root_note: u8,
) -> Result<Vec<u8>, TheoryError> {
    let voiced = voice(quality, inversion, root_note)?;
    let low = voiced.first().copied().unwrap_or(root_note as i16);
    let high = voiced.last().copied().unwrap_or(root_note as i16);
    if high > 127 {
        return Err(TheoryError::PitchWindowTooNarrow {
            low: midi_clamp(low),
            high: midi_clamp(high),
            window_low: 0,
            window_high: 127,
        });
    }

    Ok(voiced.into_iter().map(|n| n as u8).collect())
}

/// Note number for error reports; voicings never go below 0.
pub(crate) fn midi_clamp(note: i16) -> u8 {
    u8::try_from(note).unwrap_or(u8::MAX)
}

/// Pitch classes of the chord tones in inversion order (bass first).
pub fn expected_pitch_classes(
    root: PitchClass,
    quality: &ChordQuality,
    inversion: Inversion,
) -> Result<Vec<PitchClass>, TheoryError> {
    Ok(reordered_intervals(quality, inversion)?
        .into_iter()
        .map(|interval| root.transpose(interval))
        .collect())
}

/// Pitch class of the bass tone for `inversion`.
pub fn bass_pitch_class(
    root: PitchClass,
    quality: &ChordQuality,
    inversion: Inversion,
) -> Result<PitchClass, TheoryError> {
    check_supported(quality, inversion)?;
    Ok(root.transpose(quality.intervals[inversion.index()]))
}
