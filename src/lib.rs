pub mod api;
pub mod catalog;
pub mod error;
pub mod generator;
pub mod inversion;
pub mod level;
pub mod pitch;
pub mod session;
pub mod stats;
pub mod validator;

pub use api::{advance_session, generate, validate_notes, validate_text};
pub use catalog::{ChordQuality, Extension};
pub use error::*;
pub use generator::{ChordInstance, ChordKey};
pub use inversion::Inversion;
pub use level::{Level, LevelConstraint, OctaveChoices, PitchWindow};
pub use pitch::PitchClass;
pub use session::{Session, SessionScore, SessionState};
pub use stats::SessionStats;
pub use validator::{check_submission, Answer, SubmissionResult};
