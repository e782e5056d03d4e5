//! Note-set answers

use crate::generator::ChordInstance;
use crate::pitch::{pitch_class_of, PitchClass};

/// Check notes placed by the user against the generated chord.
///
/// Correct when all of these hold:
/// 1. The number of notes equals the quality's note count
/// 2. The sorted pitch-class multiset equals the chord's
/// 3. The lowest submitted note has the inversion's bass pitch class
///
/// Submission order does not matter.
pub fn validate_notes(instance: &ChordInstance, submitted: &[u8]) -> bool {
    if submitted.len() != instance.quality.note_count() {
        return false;
    }

    let mut expected: Vec<PitchClass> = instance.expected_pitch_classes();
    let mut actual: Vec<PitchClass> = submitted.iter().map(|&n| pitch_class_of(n)).collect();
    expected.sort();
    actual.sort();
    if expected != actual {
        return false;
    }

    submitted
        .iter()
        .min()
        .map_or(false, |&lowest| pitch_class_of(lowest) == instance.bass_pitch_class())
}
