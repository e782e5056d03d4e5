//! # Generator Module
//!
//! Procedurally generate chord problems for a drill level.
//!
//! ## Purpose
//! A problem is one concrete chord: a root, a quality from the catalog, an
//! inversion, and the MIDI notes that voice it inside the level's pitch window.
//! Every problem carries a canonical name (`"Cmaj7/E"`) that the text validator
//! expands into all acceptable answers.
//!
//! ## Sub-modules
//! - `instance` - [`ChordInstance`] and the voicing/naming rules
//! - `engine` - Random selection under a [`LevelConstraint`](crate::LevelConstraint)
//!
//! ## Entry Point
//! [`generate()`] - Draw one problem, avoiding an exact repeat of the previous one
//!
//! ## Example
//! ```rust
//! use chordwise::generator::generate;
//! use chordwise::LevelConstraint;
//! use rand::SeedableRng;
//! use rand_pcg::Pcg32;
//!
//! let constraint = LevelConstraint::new(&["C", "G"], &["major", "minor"]).unwrap();
//! let mut rng = Pcg32::seed_from_u64(7);
//!
//! let first = generate(&constraint, None, &mut rng).unwrap();
//! let second = generate(&constraint, Some(&first), &mut rng).unwrap();
//! assert_ne!(first.key(), second.key());
//! ```
//!
//! ## Range Policy
//! Voiced chords that fall outside the pitch window are transposed by whole
//! octaves until they fit. Notes are never dropped, so a generated chord always
//! has exactly as many notes as its quality.
//!
//! ## Repeat Avoidance
//! Generation retries up to [`MAX_ATTEMPTS`] times while the
//! `(root, quality, inversion)` triple matches the previous problem, then accepts
//! the last draw and logs a warning.

mod engine;
mod instance;


pub use engine::{generate, MAX_ATTEMPTS};
pub use instance::{ChordInstance, ChordKey};
