//! # Chord Catalog
//!
//! The single table of chord qualities, from triads through thirteenths.
//!
//! Each entry maps a quality id (`"minor7"`) to its interval set, display symbol,
//! and display name. The `extension` attribute says how far the chord is stacked,
//! so callers never need to test ids against hand-written name lists.
//!
//! ## Intervals
//! Semitone offsets from the root, strictly increasing and starting at 0:
//! - minor 3rd = 3, major 3rd = 4, perfect 5th = 7
//! - minor 7th = 10, major 7th = 11
//! - 9th = 14, 11th = 17, 13th = 21
//!
//! ## Example
//! ```rust
//! use chordwise::catalog::{lookup, Extension};
//!
//! let q = lookup("minor7").unwrap();
//! assert_eq!(q.intervals, &[0, 3, 7, 10]);
//! assert_eq!(q.symbol, "m7");
//! assert_eq!(q.extension, Extension::Seventh);
//! ```

use serde::Serialize;

use crate::error::TheoryError;
use crate::inversion::Inversion;

/// How far a chord is stacked above its triad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Extension {
    Triad,
    Sixth,
    Seventh,
    Ninth,
    Eleventh,
    Thirteenth,
}

/// One chord quality.
#[derive(Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordQuality {
    pub id: &'static str,
    pub display_name: &'static str,
    pub symbol: &'static str,
    pub intervals: &'static [u8],
    pub extension: Extension,
    /// False for qualities whose inversions are indistinguishable (augmented triad).
    pub invertible: bool,
}

impl ChordQuality {
    const fn new(
        id: &'static str,
        display_name: &'static str,
        symbol: &'static str,
        intervals: &'static [u8],
        extension: Extension,
    ) -> Self {
        Self {
            id,
            display_name,
            symbol,
            intervals,
            extension,
            invertible: true,
        }
    }

    const fn symmetric(mut self) -> Self {
        self.invertible = false;
        self
    }

    pub fn note_count(&self) -> usize {
        self.intervals.len()
    }

    /// Highest inversion this quality can be voiced in.
    pub fn max_inversion(&self) -> Inversion {
        if !self.invertible {
            return Inversion::Root;
        }
        Inversion::ALL
            .iter()
            .copied()
            .filter(|inv| inv.index() < self.note_count())
            .last()
            .unwrap_or(Inversion::Root)
    }

    pub fn supports(&self, inversion: Inversion) -> bool {
        inversion <= self.max_inversion()
    }

    /// Interval of the chord tone at `index` (0 = root, 1 = third, ...).
    pub fn interval(&self, index: usize) -> Option<u8> {
        self.intervals.get(index).copied()
    }
}

static QUALITIES: &[ChordQuality] = &[
    // Triads
    ChordQuality::new("major", "major", "", &[0, 4, 7], Extension::Triad),
    ChordQuality::new("minor", "minor", "m", &[0, 3, 7], Extension::Triad),
    ChordQuality::new("diminished", "diminished", "dim", &[0, 3, 6], Extension::Triad),
    ChordQuality::new("augmented", "augmented", "aug", &[0, 4, 8], Extension::Triad).symmetric(),
    ChordQuality::new("sus2", "suspended second", "sus2", &[0, 2, 7], Extension::Triad),
    ChordQuality::new("sus4", "suspended fourth", "sus4", &[0, 5, 7], Extension::Triad),
    // Sixths
    ChordQuality::new("major6", "major sixth", "6", &[0, 4, 7, 9], Extension::Sixth),
    ChordQuality::new("minor6", "minor sixth", "m6", &[0, 3, 7, 9], Extension::Sixth),
    // Sevenths
    ChordQuality::new("dominant7", "dominant seventh", "7", &[0, 4, 7, 10], Extension::Seventh),
    ChordQuality::new("major7", "major seventh", "maj7", &[0, 4, 7, 11], Extension::Seventh),
    ChordQuality::new("minor7", "minor seventh", "m7", &[0, 3, 7, 10], Extension::Seventh),
    ChordQuality::new("diminished7", "diminished seventh", "dim7", &[0, 3, 6, 9], Extension::Seventh),
    ChordQuality::new("half-diminished7", "half-diminished seventh", "m7b5", &[0, 3, 6, 10], Extension::Seventh),
    ChordQuality::new("minor-major7", "minor major seventh", "mMaj7", &[0, 3, 7, 11], Extension::Seventh),
    ChordQuality::new("augmented7", "augmented seventh", "aug7", &[0, 4, 8, 10], Extension::Seventh),
    // Ninths
    ChordQuality::new("dominant9", "dominant ninth", "9", &[0, 4, 7, 10, 14], Extension::Ninth),
    ChordQuality::new("major9", "major ninth", "maj9", &[0, 4, 7, 11, 14], Extension::Ninth),
    ChordQuality::new("minor9", "minor ninth", "m9", &[0, 3, 7, 10, 14], Extension::Ninth),
    // Elevenths
    ChordQuality::new("dominant11", "dominant eleventh", "11", &[0, 4, 7, 10, 14, 17], Extension::Eleventh),
    ChordQuality::new("minor11", "minor eleventh", "m11", &[0, 3, 7, 10, 14, 17], Extension::Eleventh),
    // Thirteenths
    ChordQuality::new("dominant13", "dominant thirteenth", "13", &[0, 4, 7, 10, 14, 17, 21], Extension::Thirteenth),
    ChordQuality::new("major13", "major thirteenth", "maj13", &[0, 4, 7, 11, 14, 17, 21], Extension::Thirteenth),
    ChordQuality::new("minor13", "minor thirteenth", "m13", &[0, 3, 7, 10, 14, 17, 21], Extension::Thirteenth),
];

/// Look up a quality by id.
pub fn lookup(id: &str) -> Result<&'static ChordQuality, TheoryError> {
    QUALITIES
        .iter()
        .find(|q| q.id == id)
        .ok_or_else(|| TheoryError::UnknownQuality(id.to_string()))
}

/// Every quality in catalog order.
pub fn all() -> impl Iterator<Item = &'static ChordQuality> {
    QUALITIES.iter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<&str> = all().map(|q| q.id).collect();
        assert_eq!(ids.len(), QUALITIES.len());
    }

    #[test]
    fn test_symbols_are_unique() {
        let symbols: HashSet<&str> = all().map(|q| q.symbol).collect();
        assert_eq!(symbols.len(), QUALITIES.len());
    }

    #[test]
    fn test_intervals_start_at_root_and_increase() {
        for q in all() {
            assert_eq!(q.intervals[0], 0, "{} must start at the root", q.id);
            assert!(
                q.intervals.windows(2).all(|w| w[0] < w[1]),
                "{} intervals must be strictly increasing",
                q.id
            );
        }
    }

    #[test]
    fn test_lookup_unknown() {
        assert_eq!(
            lookup("power5"),
            Err(TheoryError::UnknownQuality("power5".to_string()))
        );
    }

    #[test]
    fn test_max_inversion_follows_note_count() {
        assert_eq!(lookup("major").unwrap().max_inversion(), Inversion::Second);
        assert_eq!(lookup("dominant7").unwrap().max_inversion(), Inversion::Third);
        assert_eq!(lookup("minor9").unwrap().max_inversion(), Inversion::Fourth);
        assert_eq!(lookup("dominant13").unwrap().max_inversion(), Inversion::Fourth);
    }

    #[test]
    fn test_augmented_triad_is_not_invertible() {
        let aug = lookup("augmented").unwrap();
        assert!(!aug.invertible);
        assert_eq!(aug.max_inversion(), Inversion::Root);
        assert!(!aug.supports(Inversion::First));
        assert!(lookup("augmented7").unwrap().supports(Inversion::Third));
    }

    #[test]
    fn test_extension_matches_top_interval() {
        for q in all() {
            let top = *q.intervals.last().unwrap();
            let expected = match top {
                6..=8 => Extension::Triad,
                9 => Extension::Sixth,
                10 | 11 => Extension::Seventh,
                14 => Extension::Ninth,
                17 => Extension::Eleventh,
                21 => Extension::Thirteenth,
                other => panic!("unexpected top interval {} in {}", other, q.id),
            };
            assert_eq!(q.extension, expected, "{}", q.id);
        }
    }
}
