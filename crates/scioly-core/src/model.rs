//! Core data model types for scioly.
//!
//! These are the types the rest of the workspace passes around: questions as
//! they appear in a bank file, the two quiz modes, and the stable key that
//! identifies a presented question.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Placeholder for a missing event, topic or difficulty.
pub const UNKNOWN: &str = "Unknown";

/// A single multiple-choice (or free-answer) question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Event this question belongs to (e.g. "Astronomy").
    #[serde(default = "unknown", deserialize_with = "string_or_unknown")]
    pub event: String,
    /// Topic within the event. Bank files may call this `subtopic`.
    #[serde(
        default = "unknown",
        deserialize_with = "string_or_unknown",
        alias = "subtopic"
    )]
    pub topic: String,
    /// Difficulty label (e.g. "Easy").
    #[serde(default = "unknown", deserialize_with = "string_or_unknown")]
    pub difficulty: String,
    /// The question text.
    #[serde(rename = "question")]
    pub text: String,
    /// Answer choices, in display order. Empty for free-answer questions.
    #[serde(default)]
    pub options: Vec<String>,
    /// The correct answer.
    pub answer: String,
    /// Optional hint shown on request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Question {
    /// Create a free-answer question with unknown event, topic and difficulty.
    pub fn new(text: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            event: unknown(),
            topic: unknown(),
            difficulty: unknown(),
            text: text.into(),
            options: Vec::new(),
            answer: answer.into(),
            hint: None,
        }
    }

    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = event.into();
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = difficulty.into();
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Returns `true` iff `choice` is exactly the stored answer.
    pub fn is_correct(&self, choice: &str) -> bool {
        choice == self.answer
    }

    /// Check the invariants a loaded question must hold.
    pub fn check(&self) -> Result<(), String> {
        if self.text.trim().is_empty() {
            return Err("question text is empty".into());
        }
        if self.answer.is_empty() {
            return Err("answer is empty".into());
        }
        if !self.options.is_empty() && !self.options.contains(&self.answer) {
            return Err(format!(
                "answer '{}' is not one of the options {:?}",
                self.answer, self.options
            ));
        }
        Ok(())
    }

    /// The cheat sheet line for this question at 1-based position `index`.
    pub fn cheat_sheet_line(&self, index: usize) -> String {
        format!("Q{index}: {} - Answer: {}", self.text, self.answer)
    }
}

fn unknown() -> String {
    UNKNOWN.to_string()
}

/// Accept a string, `null`, or an empty string; the latter two become `UNKNOWN`.
fn string_or_unknown<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(match value {
        Some(s) if !s.trim().is_empty() => s,
        _ => unknown(),
    })
}

/// How questions are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Every filtered question once, no time bound.
    Study,
    /// Questions in order until the list runs out or the deadline passes.
    Drill,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Study => write!(f, "study"),
            Mode::Drill => write!(f, "drill"),
        }
    }
}

/// Stable identity of a presented question: its mode and 1-based position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionKey {
    pub mode: Mode,
    pub index: usize,
}

impl QuestionKey {
    pub fn new(mode: Mode, index: usize) -> Self {
        Self { mode, index }
    }
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.mode, self.index)
    }
}

/// What happened when a choice was submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub key: QuestionKey,
    pub correct: bool,
    /// The submitted choice.
    pub choice: String,
    /// The stored correct answer.
    pub expected: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_display() {
        assert_eq!(Mode::Study.to_string(), "study");
        assert_eq!(Mode::Drill.to_string(), "drill");
    }

    #[test]
    fn question_key_display() {
        assert_eq!(QuestionKey::new(Mode::Drill, 3).to_string(), "drill-3");
    }

    #[test]
    fn missing_fields_default_to_unknown() {
        let json = r#"{"question": "Ohm's Law formula is?", "answer": "V=IR"}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.event, UNKNOWN);
        assert_eq!(q.topic, UNKNOWN);
        assert_eq!(q.difficulty, UNKNOWN);
        assert!(q.options.is_empty());
        assert!(q.hint.is_none());
    }

    #[test]
    fn null_and_blank_fields_default_to_unknown() {
        let json = r#"{"question": "Q", "answer": "A", "topic": null, "difficulty": "  "}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.topic, UNKNOWN);
        assert_eq!(q.difficulty, UNKNOWN);
    }

    #[test]
    fn subtopic_alias() {
        let json = r#"{"question": "Q", "answer": "A", "subtopic": "Stars"}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.topic, "Stars");
    }

    #[test]
    fn correctness_is_exact_match() {
        let q = Question::new("Which technique separates DNA fragments?", "Electrophoresis")
            .with_options(["Chromatography", "Electrophoresis"]);
        assert!(q.is_correct("Electrophoresis"));
        assert!(!q.is_correct("electrophoresis"));
        assert!(!q.is_correct("Electrophoresis "));
        assert!(!q.is_correct(""));
    }

    #[test]
    fn check_rejects_answer_outside_options() {
        let q = Question::new("Q", "D").with_options(["A", "B", "C"]);
        let err = q.check().unwrap_err();
        assert!(err.contains("not one of the options"));

        assert!(Question::new("Q", "free text").check().is_ok());
        assert!(Question::new("  ", "A").check().is_err());
        assert!(Question::new("Q", "").check().is_err());
    }

    #[test]
    fn cheat_sheet_line_format() {
        let q = Question::new("Ohm's Law formula is?", "V=IR");
        assert_eq!(q.cheat_sheet_line(2), "Q2: Ohm's Law formula is? - Answer: V=IR");
    }
}
