//! Generated chord problems

use serde::Serialize;

use crate::catalog::ChordQuality;
use crate::error::TheoryError;
use crate::inversion::{self, midi_clamp, Inversion};
use crate::level::PitchWindow;
use crate::pitch::{pitch_class_of, PitchClass};

/// Identity of a problem for repeat avoidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChordKey {
    pub root: PitchClass,
    pub quality: &'static str,
    pub inversion: Inversion,
}

/// One generated chord problem.
///
/// # Fields
/// - `root`: Root pitch class
/// - `quality`: Catalog entry (intervals, symbol, name)
/// - `inversion`: Which chord tone is in the bass
/// - `octave_base`: MIDI note of the root the voicing was built from
/// - `notes`: Strictly ascending MIDI notes, all inside the level's pitch window
/// - `canonical_name`: Root spelling + symbol, with `/bass` when inverted (`"Cmaj7/E"`)
/// - `description`: Spoken form (`"C major seventh, first inversion"`)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordInstance {
    pub root: PitchClass,
    pub quality: &'static ChordQuality,
    pub inversion: Inversion,
    pub octave_base: u8,
    pub notes: Vec<u8>,
    pub canonical_name: String,
    pub description: String,
}

impl ChordInstance {
    /// Voice a chord above `root_note` and move it into `window`.
    ///
    /// The root pitch class is taken from `root_note`. If the voicing leaves the
    /// window, the whole chord (and `octave_base` with it) moves by octaves.
    pub fn build(
        quality: &'static ChordQuality,
        inversion: Inversion,
        root_note: u8,
        window: &PitchWindow,
    ) -> Result<Self, TheoryError> {
        window.check()?;
        let root = pitch_class_of(root_note);
        let voiced = inversion::voice(quality, inversion, root_note)?;
        let shift = window_shift(&voiced, window)?;

        let notes = voiced
            .iter()
            .map(|&n| (n as i16 + shift) as u8)
            .collect();
        let octave_base = (root_note as i16 + shift) as u8;
        let bass = inversion::bass_pitch_class(root, quality, inversion)?;

        Ok(Self {
            root,
            quality,
            inversion,
            octave_base,
            notes,
            canonical_name: canonical_name(root, quality, inversion, bass),
            description: format!("{} {}, {}", root, quality.display_name, inversion),
        })
    }

    pub fn key(&self) -> ChordKey {
        ChordKey {
            root: self.root,
            quality: self.quality.id,
            inversion: self.inversion,
        }
    }

    /// Lowest sounding note.
    pub fn bass_note(&self) -> u8 {
        self.notes[0]
    }

    /// Pitch class the bass must have for this inversion.
    pub fn bass_pitch_class(&self) -> PitchClass {
        pitch_class_of(self.bass_note())
    }

    /// Chord-tone pitch classes, bass first.
    pub fn expected_pitch_classes(&self) -> Vec<PitchClass> {
        self.notes.iter().map(|&n| pitch_class_of(n)).collect()
    }
}

fn canonical_name(
    root: PitchClass,
    quality: &ChordQuality,
    inversion: Inversion,
    bass: PitchClass,
) -> String {
    match inversion {
        Inversion::Root => format!("{}{}", root, quality.symbol),
        _ => format!("{}{}/{}", root, quality.symbol, bass),
    }
}

/// Semitone shift (a multiple of 12) that puts `notes` inside `window`.
fn window_shift(notes: &[i16], window: &PitchWindow) -> Result<i16, TheoryError> {
    let (low, high) = match (notes.first(), notes.last()) {
        (Some(&low), Some(&high)) => (low, high),
        _ => return Ok(0),
    };
    let too_narrow = || TheoryError::PitchWindowTooNarrow {
        low: midi_clamp(low),
        high: midi_clamp(high),
        window_low: window.low,
        window_high: window.high,
    };

    if high - low > window.span() as i16 {
        return Err(too_narrow());
    }

    let mut shift = 0i16;
    while low + shift < window.low as i16 {
        shift += 12;
    }
    while high + shift > window.high as i16 {
        shift -= 12;
    }
    if low + shift < window.low as i16 {
        return Err(too_narrow());
    }
    Ok(shift)
}
