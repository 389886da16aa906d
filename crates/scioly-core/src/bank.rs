//! JSON question bank loader.
//!
//! Loads question banks from JSON files, writes them back, and validates them.
//! Two file shapes are accepted: a flat array of question objects, or an
//! object keyed by event name whose values are arrays of question objects.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::error::BankError;
use crate::model::Question;

/// Load a question bank from a JSON file.
///
/// A missing file is [`BankError::NotFound`]; anything unparseable, or a
/// record that breaks a question invariant, is a format error.
pub fn load_bank(path: &Path) -> Result<Vec<Question>, BankError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(BankError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(BankError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let bank = parse_bank_str(&content, path)?;
    tracing::info!("loaded {} questions from {}", bank.len(), path.display());
    Ok(bank)
}

/// Parse a JSON string into a question bank (useful for testing).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<Vec<Question>, BankError> {
    let format_err = |source: serde_json::Error| BankError::Format {
        path: source_path.to_path_buf(),
        source,
    };

    let value: Value = serde_json::from_str(content).map_err(format_err)?;

    let questions = match value {
        Value::Array(_) => serde_json::from_value::<Vec<Question>>(value).map_err(format_err)?,
        Value::Object(by_event) => {
            let mut questions = Vec::new();
            for (event, entries) in by_event {
                let mut group: Vec<Question> =
                    serde_json::from_value(entries).map_err(format_err)?;
                for q in &mut group {
                    q.event = event.clone();
                }
                questions.extend(group);
            }
            questions
        }
        other => {
            return Err(BankError::UnexpectedShape {
                path: source_path.to_path_buf(),
                found: json_kind(&other),
            });
        }
    };

    for (i, q) in questions.iter().enumerate() {
        q.check().map_err(|reason| BankError::InvalidQuestion {
            path: source_path.to_path_buf(),
            index: i + 1,
            reason,
        })?;
    }

    Ok(questions)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Write a bank as a pretty-printed flat JSON array.
pub fn save_bank(path: &Path, questions: &[Question]) -> Result<()> {
    let json = serde_json::to_string_pretty(questions).context("failed to serialize bank")?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write question bank to {}", path.display()))?;
    Ok(())
}

/// Append a question to the bank file, creating the file if it is missing.
///
/// Returns the new number of questions in the bank.
pub fn append_question(path: &Path, question: Question) -> Result<usize> {
    question
        .check()
        .map_err(|reason| anyhow::anyhow!("invalid question: {reason}"))?;

    let mut bank = match load_bank(path) {
        Ok(bank) => bank,
        Err(e) if e.is_not_found() => {
            tracing::info!("creating new question bank at {}", path.display());
            Vec::new()
        }
        Err(e) => return Err(e.into()),
    };

    bank.push(question);
    save_bank(path, &bank)?;
    Ok(bank.len())
}

/// A warning from bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 1-based position of the question in the bank (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a bank for issues that do not stop it from loading.
pub fn validate_bank(questions: &[Question]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if questions.is_empty() {
        warnings.push(ValidationWarning {
            question: None,
            message: "bank contains no questions".into(),
        });
    }

    // Duplicate question text within one event
    let mut seen = HashSet::new();
    for (i, q) in questions.iter().enumerate() {
        if !seen.insert((q.event.as_str(), q.text.trim())) {
            warnings.push(ValidationWarning {
                question: Some(i + 1),
                message: format!("duplicate question in {}: {}", q.event, q.text),
            });
        }
    }

    for (i, q) in questions.iter().enumerate() {
        if q.options.len() == 1 {
            warnings.push(ValidationWarning {
                question: Some(i + 1),
                message: "only one option given".into(),
            });
        }
    }

    for (i, q) in questions.iter().enumerate() {
        let mut distinct = HashSet::new();
        if q.options.iter().any(|o| !distinct.insert(o)) {
            warnings.push(ValidationWarning {
                question: Some(i + 1),
                message: "options contain duplicates".into(),
            });
        }
    }

    warnings
}
