//! Submission results handed back to the session

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::notes::validate_notes;
use super::text::validate_text;
use crate::generator::ChordInstance;

/// What the user submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Answer {
    /// MIDI notes placed on the piano roll
    Notes(Vec<u8>),
    /// A typed chord name
    Text(String),
}

/// Outcome of one answer.
///
/// Created once per submission and consumed by the session and the presentation
/// layer. `elapsed` is measured by the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    pub is_correct: bool,
    pub expected_notes: Vec<u8>,
    pub submitted_notes: Vec<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_text: Option<String>,
    pub expected_name: String,
    pub elapsed: Duration,
}

/// Run the validator matching the answer's shape.
pub fn check_submission(
    instance: &ChordInstance,
    answer: &Answer,
    elapsed: Duration,
) -> SubmissionResult {
    let (is_correct, submitted_notes, submitted_text) = match answer {
        Answer::Notes(notes) => (validate_notes(instance, notes), notes.clone(), None),
        Answer::Text(text) => (validate_text(instance, text), Vec::new(), Some(text.clone())),
    };

    SubmissionResult {
        is_correct,
        expected_notes: instance.notes.clone(),
        submitted_notes,
        submitted_text,
        expected_name: instance.canonical_name.clone(),
        elapsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::lookup;
    use crate::inversion::Inversion;
    use crate::level::PitchWindow;

    #[test]
    fn test_check_submission_dispatches_by_shape() {
        let c = ChordInstance::build(
            lookup("minor").unwrap(),
            Inversion::Root,
            57,
            &PitchWindow::default(),
        )
        .unwrap();

        let by_notes = check_submission(&c, &Answer::Notes(vec![57, 60, 64]), Duration::from_secs(3));
        assert!(by_notes.is_correct);
        assert_eq!(by_notes.expected_notes, vec![57, 60, 64]);
        assert_eq!(by_notes.submitted_notes, vec![57, 60, 64]);
        assert_eq!(by_notes.submitted_text, None);
        assert_eq!(by_notes.elapsed, Duration::from_secs(3));

        let by_text = check_submission(&c, &Answer::Text("A major".to_string()), Duration::ZERO);
        assert!(!by_text.is_correct);
        assert_eq!(by_text.expected_name, "Am");
        assert_eq!(by_text.submitted_text.as_deref(), Some("A major"));
    }

    #[test]
    fn test_answer_json_shape() {
        let answer: Answer = serde_json::from_str(r#"{"kind":"text","value":"Dm7/F"}"#).unwrap();
        assert_eq!(answer, Answer::Text("Dm7/F".to_string()));
        let answer: Answer = serde_json::from_str(r#"{"kind":"notes","value":[60,64,67]}"#).unwrap();
        assert_eq!(answer, Answer::Notes(vec![60, 64, 67]));
    }
}
