//! Integration tests for the chord engine
//!
//! Exercises the public API end to end: levels, generation, both validators and
//! full sessions.

use std::time::Duration;

use chordwise::catalog::lookup;
use chordwise::generator;
use chordwise::{
    advance_session, generate, validate_notes, validate_text, Answer, ChordInstance, Inversion,
    Level, PitchWindow, Session, SessionScore, SessionState,
};
use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn build(quality: &str, inversion: Inversion, root_note: u8) -> ChordInstance {
    ChordInstance::build(
        lookup(quality).unwrap(),
        inversion,
        root_note,
        &PitchWindow::default(),
    )
    .unwrap()
}

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_760_000_000 + secs, 0).unwrap()
}

#[test]
fn test_c_major_note_answers() {
    let c = build("major", Inversion::Root, 60);
    assert_eq!(c.notes, vec![60, 64, 67]);
    assert_eq!(c.canonical_name, "C");
    assert!(validate_notes(&c, &[60, 64, 67]));
    assert!(!validate_notes(&c, &[64, 67, 72]), "E in the bass is an inversion");
}

#[test]
fn test_d_minor7_first_inversion_text_answers() {
    let dm7 = build("minor7", Inversion::First, 50);
    assert_eq!(dm7.bass_pitch_class().name(), "F");
    assert!(validate_text(&dm7, "Dm7/1"));
    assert!(validate_text(&dm7, "Dm7/F"));
}

#[test]
fn test_c_augmented_symmetry() {
    let c_aug = build("augmented", Inversion::Root, 60);
    assert!(validate_text(&c_aug, "E aug"));
    assert!(validate_text(&c_aug, "G# aug"));
}

#[test]
fn test_generated_problems_answer_themselves() {
    let mut rng = Pcg32::seed_from_u64(2024);
    for level in Level::presets().unwrap() {
        let mut previous: Option<ChordInstance> = None;
        for _ in 0..100 {
            let chord = generator::generate(&level.constraint, previous.as_ref(), &mut rng).unwrap();
            assert!(validate_notes(&chord, &chord.notes), "{}", chord.canonical_name);
            assert!(
                validate_text(&chord, &chord.canonical_name),
                "{}",
                chord.canonical_name
            );
            if let Some(prev) = &previous {
                assert_ne!(prev.key(), chord.key(), "repeated {}", chord.canonical_name);
            }
            previous = Some(chord);
        }
    }
}

#[test]
fn test_thread_rng_generate() {
    let level = Level::preset("all-triads").unwrap();
    let chord = generate(&level.constraint, None).unwrap();
    assert_eq!(chord.notes.len(), 3);
}

#[test]
fn test_reducer_matches_session_bookkeeping() {
    let score = [true, false, true, true]
        .iter()
        .fold(SessionScore::default(), |s, &ok| {
            advance_session(s, Duration::from_millis(1500), ok)
        });
    assert_eq!(score.correct, 3);
    assert_eq!(score.total, 4);
    assert_eq!(score.streak, 2);
    assert_eq!(score.best_streak, 2);
    assert_eq!(score.average_time(), Duration::from_millis(1500));
}

#[test]
fn test_session_from_yaml_level() {
    let yaml = r#"
name: quick-sevenths
title: Quick sevenths
total-problems: 3
pass-accuracy: 60
pass-time: 5
allowed-roots: [G, D]
allowed-qualities: [dominant7, minor7]
allow-inversions: true
"#;
    let level = Level::from_yaml(yaml).unwrap();
    let mut session = Session::with_seed(level, 77).unwrap();
    session.start(at(0)).unwrap();

    let mut answered = 0;
    while let SessionState::AwaitingAnswer { problem } = session.state() {
        let answer = Answer::Text(problem.canonical_name.to_lowercase());
        let result = session.submit(&answer, Duration::from_secs(2)).unwrap();
        assert!(result.is_correct);
        answered += 1;
        session.advance(at(10 * answered)).unwrap();
    }

    assert_eq!(answered, 3);
    match session.state() {
        SessionState::Completed { stats } => {
            assert!(stats.passed);
            assert_eq!(stats.accuracy, 100.0);
            assert_eq!(stats.best_streak, 3);
            assert_eq!(stats.start_time, at(0));
            assert_eq!(stats.end_time, at(30));
            assert_eq!(stats.level, "quick-sevenths");
        }
        other => panic!("expected Completed, got {:?}", other),
    }
}

#[test]
fn test_session_fails_on_either_threshold() {
    let mut level = Level::preset("triads").unwrap();
    level.total_problems = 2;
    level.pass_accuracy = 100.0;
    level.pass_time = 10.0;

    // Accurate but slow
    let mut session = Session::with_seed(level.clone(), 5).unwrap();
    session.start(at(0)).unwrap();
    for _ in 0..2 {
        let notes = session.state().problem().unwrap().notes.clone();
        session
            .submit(&Answer::Notes(notes), Duration::from_secs(11))
            .unwrap();
        session.advance(at(30)).unwrap();
    }
    assert!(matches!(
        session.state(),
        SessionState::Completed { stats } if !stats.passed
    ));

    // Fast but one wrong
    let mut session = Session::with_seed(level, 5).unwrap();
    session.start(at(0)).unwrap();
    session
        .submit(&Answer::Notes(vec![]), Duration::from_secs(1))
        .unwrap();
    session.advance(at(1)).unwrap();
    let notes = session.state().problem().unwrap().notes.clone();
    session
        .submit(&Answer::Notes(notes), Duration::from_secs(1))
        .unwrap();
    session.advance(at(2)).unwrap();
    assert!(matches!(
        session.state(),
        SessionState::Completed { stats } if !stats.passed && stats.accuracy == 50.0
    ));
}
