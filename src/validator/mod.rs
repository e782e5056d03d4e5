//! # Validator Module
//!
//! Decide whether a submitted answer names or builds the generated chord.
//!
//! ## Submission Shapes
//! - **Notes** - MIDI notes placed on a piano roll. Octave placement is free, but the
//!   set of pitch classes must match and the lowest note must be the inversion's bass.
//! - **Text** - A typed chord name. Case and whitespace are ignored, and any accepted
//!   notation counts: slash chords (`Dm7/F`), numbered inversions (`Dm7/1`), spoken
//!   inversions (`Dm7 first inversion`), quality synonyms (`Dmin7`, `D-7`) and
//!   enharmonic roots (`Bb` for `A#`).
//!
//! Both validators are pure functions of `(instance, submission)`. A wrong answer is
//! `false`, never an error.
//!
//! ## Example
//! ```rust
//! use chordwise::catalog::lookup;
//! use chordwise::validator::{validate_notes, validate_text};
//! use chordwise::{ChordInstance, Inversion, PitchWindow};
//!
//! let chord = ChordInstance::build(
//!     lookup("major").unwrap(),
//!     Inversion::Root,
//!     60,
//!     &PitchWindow::default(),
//! ).unwrap();
//!
//! assert!(validate_notes(&chord, &[48, 52, 55]));
//! assert!(!validate_notes(&chord, &[64, 67, 72]));  // E in the bass
//! assert!(validate_text(&chord, "C major"));
//! ```

mod notes;
mod submission;
mod text;

pub use notes::validate_notes;
pub use submission::{check_submission, Answer, SubmissionResult};
pub use text::{acceptable_answers, normalize, quality_synonyms, validate_text};
