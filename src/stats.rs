//! Session statistics record
//!
//! The plain record handed to the external statistics collaborator when a session
//! completes. Persistence and leaderboards live outside this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::level::Level;
use crate::session::SessionScore;

/// Final numbers for one completed session.
///
/// Times are in seconds. `accuracy` is a percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub level: String,
    pub accuracy: f64,
    pub avg_time: f64,
    pub total_time: f64,
    pub problems_solved: u32,
    pub correct_answers: u32,
    pub best_streak: u32,
    pub passed: bool,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl SessionStats {
    pub fn from_score(
        level: &Level,
        score: &SessionScore,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            level: level.name.clone(),
            accuracy: score.accuracy(),
            avg_time: score.average_time().as_secs_f64(),
            total_time: score.total_time.as_secs_f64(),
            problems_solved: score.total,
            correct_answers: score.correct,
            best_streak: score.best_streak,
            passed: score.passes(level),
            start_time,
            end_time,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
