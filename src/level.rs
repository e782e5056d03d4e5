//! # Level Configuration
//!
//! A level bundles the constraints the generator draws from with the thresholds a
//! session must meet to pass.
//!
//! Levels are written in YAML with kebab-case keys. Unknown roots, unknown quality
//! ids, octaves past the MIDI range and pitch windows too narrow for the widest
//! reachable voicing are rejected when a level is loaded, so a session never starts
//! on a configuration the generator cannot satisfy.
//!
//! ## Example
//! ```rust
//! use chordwise::Level;
//!
//! let yaml = r#"
//! name: triads
//! title: Major and minor triads
//! total-problems: 10
//! pass-accuracy: 80
//! pass-time: 8.0
//! allowed-roots: [C, F, G]
//! allowed-qualities: [major, minor]
//! "#;
//!
//! let level = Level::from_yaml(yaml).unwrap();
//! assert_eq!(level.total_problems, 10);
//! assert!(!level.constraint.allow_inversions);
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::{self, ChordQuality};
use crate::error::TheoryError;
use crate::inversion::{self, Inversion};
use crate::pitch::PitchClass;

const PRESETS_YAML: &str = include_str!("../levels/presets.yaml");

/// Inclusive range of MIDI notes a generated chord must sit in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchWindow {
    pub low: u8,
    pub high: u8,
}

impl Default for PitchWindow {
    fn default() -> Self {
        Self { low: 24, high: 84 }
    }
}

impl PitchWindow {
    pub fn contains(&self, note: u8) -> bool {
        (self.low..=self.high).contains(&note)
    }

    pub fn span(&self) -> u8 {
        self.high.saturating_sub(self.low)
    }

    /// A non-empty range of MIDI notes.
    pub fn check(&self) -> Result<(), TheoryError> {
        if self.low >= self.high || self.high > 127 {
            return Err(TheoryError::InvalidLevel(format!(
                "pitch-window {}..={} is not a valid MIDI range",
                self.low, self.high
            )));
        }
        Ok(())
    }
}

/// Octaves the root may be placed in, by voicing.
///
/// Root-position chords are not lifted further, so they may use a wider range than
/// inverted chords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OctaveChoices {
    pub root_position: Vec<i8>,
    pub inverted: Vec<i8>,
}

impl Default for OctaveChoices {
    fn default() -> Self {
        Self {
            root_position: vec![3, 4],
            inverted: vec![3],
        }
    }
}

impl OctaveChoices {
    pub fn for_inversion(&self, inversion: Inversion) -> &[i8] {
        match inversion {
            Inversion::Root => &self.root_position,
            _ => &self.inverted,
        }
    }
}

fn default_required_weight() -> f64 {
    0.5
}

/// What the generator may choose from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LevelConstraint {
    pub allowed_roots: Vec<PitchClass>,
    pub allowed_qualities: Vec<String>,
    #[serde(default)]
    pub allow_inversions: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_inversion: Option<Inversion>,
    /// Chance of using `required_inversion` instead of root position.
    #[serde(default = "default_required_weight")]
    pub required_inversion_weight: f64,
    #[serde(default)]
    pub octaves: OctaveChoices,
    #[serde(default)]
    pub pitch_window: PitchWindow,
}

impl LevelConstraint {
    /// A constraint with default octaves and window, no inversions.
    pub fn new(roots: &[&str], qualities: &[&str]) -> Result<Self, TheoryError> {
        let allowed_roots = roots
            .iter()
            .map(|r| PitchClass::from_name(r))
            .collect::<Result<Vec<_>, _>>()?;
        let constraint = Self {
            allowed_roots,
            allowed_qualities: qualities.iter().map(|q| q.to_string()).collect(),
            allow_inversions: false,
            required_inversion: None,
            required_inversion_weight: default_required_weight(),
            octaves: OctaveChoices::default(),
            pitch_window: PitchWindow::default(),
        };
        constraint.qualities()?;
        Ok(constraint)
    }

    pub fn with_inversions(mut self) -> Self {
        self.allow_inversions = true;
        self
    }

    pub fn with_required_inversion(mut self, inversion: Inversion) -> Self {
        self.allow_inversions = true;
        self.required_inversion = Some(inversion);
        self
    }

    /// Resolve quality ids against the catalog.
    pub fn qualities(&self) -> Result<Vec<&'static ChordQuality>, TheoryError> {
        self.allowed_qualities
            .iter()
            .map(|id| catalog::lookup(id))
            .collect()
    }

    /// Check that the generator can always produce a problem from this constraint.
    pub fn validate(&self) -> Result<(), TheoryError> {
        if self.allowed_roots.is_empty() {
            return Err(TheoryError::EmptyConstraintSet {
                field: "allowed-roots",
            });
        }
        if self.allowed_qualities.is_empty() {
            return Err(TheoryError::EmptyConstraintSet {
                field: "allowed-qualities",
            });
        }
        self.qualities()?;

        if self.octaves.root_position.is_empty() {
            return Err(TheoryError::EmptyConstraintSet {
                field: "octaves.root-position",
            });
        }
        if self.allow_inversions && self.octaves.inverted.is_empty() {
            return Err(TheoryError::EmptyConstraintSet {
                field: "octaves.inverted",
            });
        }
        if self.required_inversion.is_some() && !self.allow_inversions {
            return Err(TheoryError::InvalidLevel(
                "required-inversion needs allow-inversions: true".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.required_inversion_weight) {
            return Err(TheoryError::InvalidLevel(format!(
                "required-inversion-weight must be between 0 and 1, got {}",
                self.required_inversion_weight
            )));
        }
        self.pitch_window.check()?;

        let inverted: &[i8] = if self.allow_inversions {
            &self.octaves.inverted
        } else {
            &[]
        };
        for &octave in self.octaves.root_position.iter().chain(inverted) {
            for root in &self.allowed_roots {
                root.in_octave(octave).map_err(|_| {
                    TheoryError::InvalidLevel(format!(
                        "octave {} puts root {} outside the MIDI range",
                        octave, root
                    ))
                })?;
            }
        }

        // Chords move by whole octaves: a voicing spanning s semitones lands
        // inside the window from any anchor only if the window spans s + 11.
        let (widest, quality, inversion) = self.widest_voicing()?;
        if widest as u16 + 11 > self.pitch_window.span() as u16 {
            return Err(TheoryError::InvalidLevel(format!(
                "pitch-window {}..={} is too narrow for {} in {} (spans {} semitones, needs a window of at least {})",
                self.pitch_window.low,
                self.pitch_window.high,
                quality,
                inversion,
                widest,
                widest as u16 + 11
            )));
        }
        Ok(())
    }

    /// Inversions the generator can produce for `quality` under this constraint.
    fn reachable_inversions(&self, quality: &ChordQuality) -> Vec<Inversion> {
        let mut inversions = vec![Inversion::Root];
        if !self.allow_inversions {
            return inversions;
        }
        match self.required_inversion {
            Some(required) if quality.supports(required) => inversions.push(required),
            Some(_) => {}
            None => inversions.extend(
                Inversion::ALL[1..]
                    .iter()
                    .copied()
                    .filter(|inv| quality.supports(*inv)),
            ),
        }
        inversions
    }

    /// Widest close voicing the generator can produce, with its quality and inversion.
    fn widest_voicing(&self) -> Result<(u8, &'static str, Inversion), TheoryError> {
        let mut widest = (0, "", Inversion::Root);
        for quality in self.qualities()? {
            for inv in self.reachable_inversions(quality) {
                let span = inversion::span(quality, inv)?;
                if span > widest.0 {
                    widest = (span, quality.id, inv);
                }
            }
        }
        Ok(widest)
    }
}

/// A playable level: constraint plus session length and pass thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Level {
    pub name: String,
    #[serde(default)]
    pub title: String,
    pub total_problems: u32,
    /// Minimum accuracy in percent.
    pub pass_accuracy: f64,
    /// Maximum average answer time in seconds.
    pub pass_time: f64,
    #[serde(flatten)]
    pub constraint: LevelConstraint,
}

impl Level {
    /// Parse and validate a single level.
    pub fn from_yaml(content: &str) -> Result<Self, TheoryError> {
        let level: Level =
            serde_yaml::from_str(content).map_err(|e| TheoryError::InvalidLevel(e.to_string()))?;
        level.validate()?;
        Ok(level)
    }

    /// Parse and validate a list of levels.
    pub fn list_from_yaml(content: &str) -> Result<Vec<Self>, TheoryError> {
        let levels: Vec<Level> =
            serde_yaml::from_str(content).map_err(|e| TheoryError::InvalidLevel(e.to_string()))?;
        for level in &levels {
            level.validate()?;
        }
        Ok(levels)
    }

    /// The built-in levels, easiest first.
    pub fn presets() -> Result<Vec<Self>, TheoryError> {
        Self::list_from_yaml(PRESETS_YAML)
    }

    /// Find a built-in level by name.
    pub fn preset(name: &str) -> Result<Self, TheoryError> {
        Self::presets()?
            .into_iter()
            .find(|l| l.name == name)
            .ok_or_else(|| TheoryError::InvalidLevel(format!("No built-in level named '{}'", name)))
    }

    pub fn validate(&self) -> Result<(), TheoryError> {
        if self.total_problems == 0 {
            return Err(TheoryError::InvalidLevel(format!(
                "level '{}' must have at least one problem",
                self.name
            )));
        }
        if !(0.0..=100.0).contains(&self.pass_accuracy) {
            return Err(TheoryError::InvalidLevel(format!(
                "level '{}': pass-accuracy must be a percentage",
                self.name
            )));
        }
        if self.pass_time <= 0.0 {
            return Err(TheoryError::InvalidLevel(format!(
                "level '{}': pass-time must be positive",
                self.name
            )));
        }
        self.constraint.validate()
    }
}
