//! # Public API
//!
//! The small surface a host application needs. UI components own all I/O (piano
//! roll, text box, timers, persistence) and call into these functions.
//!
//! ## Functions
//!
//! - [`generate()`] - Draw a chord problem for a level
//! - [`validate_notes()`] - Check notes placed on a piano roll
//! - [`validate_text()`] - Check a typed chord name
//! - [`advance_session()`] - Fold one answer into a session score
//!
//! For a full drill loop with phases and a pass/fail verdict, use
//! [`Session`](crate::Session) instead.
//!
//! ## Typical Usage
//!
//! ```rust
//! use chordwise::{advance_session, generate, validate_text, Level, SessionScore};
//! use std::time::Duration;
//!
//! let level = Level::preset("triads")?;
//! let problem = generate(&level.constraint, None)?;
//!
//! let correct = validate_text(&problem, &problem.canonical_name);
//! let score = advance_session(SessionScore::default(), Duration::from_secs(4), correct);
//! assert_eq!(score.correct, 1);
//! # Ok::<(), chordwise::TheoryError>(())
//! ```

use std::time::Duration;

use crate::error::TheoryError;
use crate::generator::{self, ChordInstance};
use crate::level::LevelConstraint;
use crate::session::SessionScore;

pub use crate::validator::{validate_notes, validate_text};

/// Generate a chord problem using the thread-local RNG.
///
/// Pass the problem just answered as `previous` so the same root, quality and
/// inversion are not asked twice in a row. For reproducible sequences call
/// [`generator::generate`] with a seeded RNG.
///
/// # Errors
/// Returns [`TheoryError`] if the constraint is empty, names an unknown quality, or
/// its pitch window cannot hold a voiced chord.
pub fn generate(
    constraint: &LevelConstraint,
    previous: Option<&ChordInstance>,
) -> Result<ChordInstance, TheoryError> {
    generator::generate(constraint, previous, &mut rand::thread_rng())
}

/// Score reducer: the score after one more answer.
///
/// Increments `total`; increments `correct` and `streak` on a correct answer and
/// resets `streak` otherwise; keeps `best_streak` and the running time.
pub fn advance_session(score: SessionScore, elapsed: Duration, correct: bool) -> SessionScore {
    score.record(elapsed, correct)
}
