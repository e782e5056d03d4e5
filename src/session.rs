//! # Session State Machine
//!
//! Drives one drill session: generate a problem, take an answer, show feedback,
//! move on, and finally decide pass or fail.
//!
//! ## Phases
//! ```text
//! NotStarted --start--> AwaitingAnswer --submit--> Feedback --advance--+
//!                             ^                                        |
//!                             +------------ more problems -------------+
//!                                                                      |
//!                                            Completed <-- last one ---+
//! ```
//! `reset` returns to `NotStarted` from anywhere. `start` is also allowed from
//! `Completed` to retry the level.
//!
//! ## Scoring
//! Score bookkeeping is the pure reducer [`SessionScore::record`]: it takes the
//! old score and one answer and returns the new score. The [`Session`] only wires
//! that reducer to the generator and validators; it holds no global state, so
//! independent sessions never interfere.
//!
//! ## Time
//! The engine never reads a clock. Answer times and session timestamps come from
//! the caller.
//!
//! ## Example
//! ```rust
//! use chordwise::{Answer, Level, Session, SessionState};
//! use chrono::Utc;
//! use std::time::Duration;
//!
//! let level = Level::preset("triads").unwrap();
//! let mut session = Session::with_seed(level, 1).unwrap();
//!
//! let problem = session.start(Utc::now()).unwrap();
//! let result = session
//!     .submit(&Answer::Text(problem.canonical_name.clone()), Duration::from_secs(2))
//!     .unwrap();
//! assert!(result.is_correct);
//!
//! session.advance(Utc::now()).unwrap();
//! assert!(matches!(session.state(), SessionState::AwaitingAnswer { .. }));
//! ```

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::TheoryError;
use crate::generator::{generate, ChordInstance};
use crate::level::Level;
use crate::stats::SessionStats;
use crate::validator::{check_submission, Answer, SubmissionResult};

/// Running score for a session.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionScore {
    pub correct: u32,
    pub total: u32,
    pub streak: u32,
    pub best_streak: u32,
    pub total_time: Duration,
}

impl SessionScore {
    /// Fold one answer into the score.
    pub fn record(self, elapsed: Duration, correct: bool) -> Self {
        let streak = if correct { self.streak + 1 } else { 0 };
        Self {
            correct: self.correct + u32::from(correct),
            total: self.total + 1,
            streak,
            best_streak: self.best_streak.max(streak),
            total_time: self.total_time + elapsed,
        }
    }

    /// Percentage of correct answers, 0 before any answer.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64 * 100.0
    }

    pub fn average_time(&self) -> Duration {
        if self.total == 0 {
            return Duration::ZERO;
        }
        self.total_time / self.total
    }

    /// Both thresholds met: accuracy at least `pass_accuracy` and average time at
    /// most `pass_time` seconds.
    pub fn passes(&self, level: &Level) -> bool {
        self.accuracy() >= level.pass_accuracy
            && self.average_time().as_secs_f64() <= level.pass_time
    }
}

/// Where a session is.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    NotStarted,
    AwaitingAnswer {
        problem: ChordInstance,
    },
    Feedback {
        problem: ChordInstance,
        result: SubmissionResult,
    },
    Completed {
        stats: SessionStats,
    },
}

impl SessionState {
    pub fn phase(&self) -> &'static str {
        match self {
            SessionState::NotStarted => "not started",
            SessionState::AwaitingAnswer { .. } => "awaiting an answer",
            SessionState::Feedback { .. } => "showing feedback",
            SessionState::Completed { .. } => "completed",
        }
    }

    /// The problem on screen, if any.
    pub fn problem(&self) -> Option<&ChordInstance> {
        match self {
            SessionState::AwaitingAnswer { problem } | SessionState::Feedback { problem, .. } => {
                Some(problem)
            }
            _ => None,
        }
    }
}

/// One learner working through one level.
#[derive(Debug)]
pub struct Session<R: Rng = Pcg32> {
    level: Level,
    rng: R,
    state: SessionState,
    score: SessionScore,
    started_at: Option<DateTime<Utc>>,
}

impl Session<Pcg32> {
    /// Session with a reproducible problem sequence.
    pub fn with_seed(level: Level, seed: u64) -> Result<Self, TheoryError> {
        Self::new(level, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    pub fn new(level: Level, rng: R) -> Result<Self, TheoryError> {
        level.validate()?;
        Ok(Self {
            level,
            rng,
            state: SessionState::NotStarted,
            score: SessionScore::default(),
            started_at: None,
        })
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn score(&self) -> &SessionScore {
        &self.score
    }

    fn invalid(&self, action: &'static str) -> TheoryError {
        TheoryError::InvalidTransition {
            action,
            phase: self.state.phase(),
        }
    }

    /// Reset the score and present the first problem.
    pub fn start(&mut self, started_at: DateTime<Utc>) -> Result<ChordInstance, TheoryError> {
        if !matches!(
            self.state,
            SessionState::NotStarted | SessionState::Completed { .. }
        ) {
            return Err(self.invalid("start"));
        }

        let problem = generate(&self.level.constraint, None, &mut self.rng)?;
        info!(level = %self.level.name, problems = self.level.total_problems, "session started");

        self.score = SessionScore::default();
        self.started_at = Some(started_at);
        self.state = SessionState::AwaitingAnswer {
            problem: problem.clone(),
        };
        Ok(problem)
    }

    /// Check an answer to the current problem and show feedback.
    pub fn submit(
        &mut self,
        answer: &Answer,
        elapsed: Duration,
    ) -> Result<SubmissionResult, TheoryError> {
        let problem = match std::mem::replace(&mut self.state, SessionState::NotStarted) {
            SessionState::AwaitingAnswer { problem } => problem,
            other => {
                self.state = other;
                return Err(self.invalid("submit"));
            }
        };

        let result = check_submission(&problem, answer, elapsed);
        self.score = self.score.record(elapsed, result.is_correct);
        debug!(
            chord = %problem.canonical_name,
            correct = result.is_correct,
            streak = self.score.streak,
            "answer checked"
        );

        self.state = SessionState::Feedback {
            problem,
            result: result.clone(),
        };
        Ok(result)
    }

    /// Leave feedback: present the next problem, or finish the session.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<&SessionState, TheoryError> {
        let finished = match &self.state {
            SessionState::Feedback { problem, .. } => problem.clone(),
            _ => return Err(self.invalid("advance")),
        };

        if self.score.total < self.level.total_problems {
            let problem = generate(&self.level.constraint, Some(&finished), &mut self.rng)?;
            self.state = SessionState::AwaitingAnswer { problem };
        } else {
            let started_at = self.started_at.unwrap_or(now);
            let stats = SessionStats::from_score(&self.level, &self.score, started_at, now);
            info!(
                level = %self.level.name,
                accuracy = stats.accuracy,
                avg_time = stats.avg_time,
                passed = stats.passed,
                "session completed"
            );
            self.state = SessionState::Completed { stats };
        }
        Ok(&self.state)
    }

    /// Discard the score and current problem.
    pub fn reset(&mut self) {
        self.state = SessionState::NotStarted;
        self.score = SessionScore::default();
        self.started_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn level(total: u32, pass_accuracy: f64, pass_time: f64) -> Level {
        let mut level = Level::preset("triads").unwrap();
        level.total_problems = total;
        level.pass_accuracy = pass_accuracy;
        level.pass_time = pass_time;
        level
    }

    fn answer_current(session: &mut Session, correct: bool, secs: u64) {
        let problem = session.state().problem().unwrap().clone();
        let answer = if correct {
            Answer::Notes(problem.notes.clone())
        } else {
            Answer::Text("not a chord".to_string())
        };
        session.submit(&answer, Duration::from_secs(secs)).unwrap();
        session.advance(now()).unwrap();
    }

    #[test]
    fn test_record_streaks() {
        let score = SessionScore::default()
            .record(Duration::from_secs(1), true)
            .record(Duration::from_secs(1), true)
            .record(Duration::from_secs(1), true)
            .record(Duration::from_secs(1), false)
            .record(Duration::from_secs(1), true);

        assert_eq!(score.correct, 4);
        assert_eq!(score.total, 5);
        assert_eq!(score.streak, 1);
        assert_eq!(score.best_streak, 3);
        assert_eq!(score.total_time, Duration::from_secs(5));
        assert_eq!(score.accuracy(), 80.0);
    }

    #[test]
    fn test_empty_score() {
        let score = SessionScore::default();
        assert_eq!(score.accuracy(), 0.0);
        assert_eq!(score.average_time(), Duration::ZERO);
    }

    #[test]
    fn test_full_session_passes() {
        let mut session = Session::with_seed(level(4, 75.0, 5.0), 8).unwrap();
        session.start(now()).unwrap();
        answer_current(&mut session, true, 3);
        answer_current(&mut session, true, 4);
        answer_current(&mut session, false, 5);
        answer_current(&mut session, true, 4);

        match session.state() {
            SessionState::Completed { stats } => {
                assert_eq!(stats.accuracy, 75.0);
                assert_eq!(stats.avg_time, 4.0);
                assert_eq!(stats.problems_solved, 4);
                assert_eq!(stats.best_streak, 2);
                assert!(stats.passed);
            }
            other => panic!("expected Completed, got {:?}", other),
        }
    }

    #[test]
    fn test_low_accuracy_fails() {
        let mut session = Session::with_seed(level(2, 75.0, 10.0), 8).unwrap();
        session.start(now()).unwrap();
        answer_current(&mut session, true, 1);
        answer_current(&mut session, false, 1);
        match session.state() {
            SessionState::Completed { stats } => assert!(!stats.passed),
            other => panic!("expected Completed, got {:?}", other),
        }
    }

    #[test]
    fn test_slow_answers_fail() {
        let mut session = Session::with_seed(level(2, 50.0, 3.0), 8).unwrap();
        session.start(now()).unwrap();
        answer_current(&mut session, true, 3);
        answer_current(&mut session, true, 4);
        match session.state() {
            SessionState::Completed { stats } => {
                assert_eq!(stats.accuracy, 100.0);
                assert!(!stats.passed);
            }
            other => panic!("expected Completed, got {:?}", other),
        }
    }

    #[test]
    fn test_advance_avoids_repeating_previous_problem() {
        let mut session = Session::with_seed(level(30, 0.0, 100.0), 2).unwrap();
        session.start(now()).unwrap();
        for _ in 0..29 {
            let before = session.state().problem().unwrap().key();
            answer_current(&mut session, true, 1);
            let after = session.state().problem().unwrap().key();
            assert_ne!(before, after);
        }
    }

    #[test]
    fn test_invalid_transitions() {
        let mut session = Session::with_seed(level(2, 0.0, 100.0), 1).unwrap();
        assert_eq!(
            session.advance(now()).unwrap_err(),
            TheoryError::InvalidTransition {
                action: "advance",
                phase: "not started"
            }
        );
        assert!(session
            .submit(&Answer::Text("C".to_string()), Duration::ZERO)
            .is_err());

        session.start(now()).unwrap();
        assert!(session.start(now()).is_err());
        assert!(session.advance(now()).is_err());

        session
            .submit(&Answer::Text("C".to_string()), Duration::ZERO)
            .unwrap();
        assert_eq!(
            session
                .submit(&Answer::Text("C".to_string()), Duration::ZERO)
                .unwrap_err(),
            TheoryError::InvalidTransition {
                action: "submit",
                phase: "showing feedback"
            }
        );
        assert!(matches!(session.state(), SessionState::Feedback { .. }));
    }

    #[test]
    fn test_start_and_submit_return_what_is_on_screen() {
        let mut session = Session::with_seed(level(2, 0.0, 100.0), 3).unwrap();
        let problem = session.start(now()).unwrap();
        assert_eq!(session.state().problem(), Some(&problem));

        let result = session
            .submit(&Answer::Notes(problem.notes.clone()), Duration::from_secs(2))
            .unwrap();
        assert!(result.is_correct);
        match session.state() {
            SessionState::Feedback {
                problem: shown,
                result: recorded,
            } => {
                assert_eq!(shown, &problem);
                assert_eq!(recorded, &result);
            }
            other => panic!("expected Feedback, got {:?}", other),
        }
    }

    #[test]
    fn test_reset_and_retry() {
        let mut session = Session::with_seed(level(1, 0.0, 100.0), 4).unwrap();
        session.start(now()).unwrap();
        answer_current(&mut session, true, 1);
        assert!(matches!(session.state(), SessionState::Completed { .. }));

        session.start(now()).unwrap();
        assert_eq!(*session.score(), SessionScore::default());
        assert!(matches!(session.state(), SessionState::AwaitingAnswer { .. }));

        session.reset();
        assert_eq!(session.state(), &SessionState::NotStarted);
        assert_eq!(session.score().total, 0);
    }
}
