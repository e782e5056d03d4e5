//! # Error Types
//!
//! This module defines all error types for the chord engine.
//!
//! Every failure here is local and synchronous: a bad note name, an unknown chord
//! quality, or a level configuration that cannot produce a problem. A wrong answer
//! is never an error; validators return `false` for it.
//!
//! ## Error Types
//! - `InvalidNoteName` - A note or root name that is not one of the known spellings
//! - `UnknownQuality` - A quality id missing from the chord catalog
//! - `EmptyConstraintSet` - A level with no roots or no qualities to draw from
//! - `GenerationExhausted` - Duplicate avoidance gave up (soft, logged only)
//! - `UnsupportedInversion` - An inversion the chord quality cannot express
//! - `PitchWindowTooNarrow` - A voiced chord that cannot fit the display window
//! - `InvalidLevel` - Malformed level YAML or inconsistent thresholds
//! - `InvalidTransition` - A session transition called from the wrong phase
//!
//! ## Usage
//! ```rust
//! use chordwise::{PitchClass, TheoryError};
//!
//! match PitchClass::from_name("H") {
//!     Ok(pc) => println!("pitch class {}", pc),
//!     Err(TheoryError::InvalidNoteName(name)) => eprintln!("not a note: {}", name),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TheoryError {
    /// A note name that is not a recognized spelling.
    ///
    /// # Example
    /// ```
    /// # use chordwise::TheoryError;
    /// let err = TheoryError::InvalidNoteName("X#".to_string());
    /// assert_eq!(err.to_string(), "Invalid note name: X#");
    /// ```
    #[error("Invalid note name: {0}")]
    InvalidNoteName(String),

    /// A quality id that is not in the chord catalog.
    #[error("Unknown chord quality: {0}")]
    UnknownQuality(String),

    /// A level constraint with nothing to choose from.
    ///
    /// `field` names the empty set (`allowed-roots`, `allowed-qualities`, or an
    /// octave list).
    #[error("Level constraint has no usable {field}")]
    EmptyConstraintSet { field: &'static str },

    /// Duplicate avoidance reached its attempt bound.
    ///
    /// Never returned to callers. The generator logs it and keeps the last result.
    #[error("Gave up avoiding a repeated problem after {attempts} attempts")]
    GenerationExhausted { attempts: usize },

    /// An inversion the quality cannot express.
    ///
    /// # Example
    /// ```
    /// # use chordwise::TheoryError;
    /// let err = TheoryError::UnsupportedInversion {
    ///     quality: "major".to_string(),
    ///     inversion: "third inversion".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Chord quality 'major' has no third inversion");
    /// ```
    #[error("Chord quality '{quality}' has no {inversion}")]
    UnsupportedInversion { quality: String, inversion: String },

    /// A voiced chord whose span does not fit the pitch window.
    #[error("Chord spanning {low}..={high} cannot be transposed into window {window_low}..={window_high}")]
    PitchWindowTooNarrow {
        low: u8,
        high: u8,
        window_low: u8,
        window_high: u8,
    },

    /// Level configuration that could not be loaded or is inconsistent.
    #[error("Invalid level: {0}")]
    InvalidLevel(String),

    /// A session transition called from a phase that does not allow it.
    #[error("Cannot {action} while session is {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: &'static str,
    },
}
