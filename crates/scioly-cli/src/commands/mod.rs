pub mod add;
pub mod init;
pub mod menu;
pub mod quiz;
pub mod validate;
pub mod view;

use std::path::PathBuf;

use anyhow::{Context, Result};

use scioly_core::config::{load_config_from, ScioConfig};
use scioly_core::{bank, filter, Question};

use crate::BankArgs;

/// Config with the command-line bank path applied.
pub fn load_config(args: &BankArgs) -> Result<ScioConfig> {
    let mut config = load_config_from(args.config.as_deref())?;
    if let Some(bank) = &args.bank {
        config.bank_path = bank.clone();
    }
    Ok(config)
}

/// Load the bank named by `config`, refusing an empty one.
pub fn load_questions(config: &ScioConfig) -> Result<Vec<Question>> {
    let questions = bank::load_bank(&config.bank_path)?;
    if questions.is_empty() {
        anyhow::bail!(
            "question bank {} has no questions. Run `scioly add` first.",
            config.bank_path.display()
        );
    }
    Ok(questions)
}

/// Pick the event to start on: the requested one, the configured default,
/// then the first event in the bank.
pub fn resolve_event(
    questions: &[Question],
    requested: Option<&str>,
    config: &ScioConfig,
) -> Result<String> {
    let events = filter::events(questions);
    match requested.or(config.default_event.as_deref()) {
        Some(event) if events.iter().any(|e| e == event) => Ok(event.to_string()),
        Some(event) => anyhow::bail!(
            "event '{event}' not found in bank. Available events: {}",
            events.join(", ")
        ),
        None => events
            .into_iter()
            .next()
            .context("question bank has no events"),
    }
}

/// Split a comma-separated list, dropping blank entries.
pub fn parse_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn output_dir(requested: Option<PathBuf>, config: &ScioConfig) -> PathBuf {
    requested.unwrap_or_else(|| config.output_dir.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank() -> Vec<Question> {
        vec![
            Question::new("Q1", "A").with_event("Forensics"),
            Question::new("Q2", "B").with_event("Astronomy"),
        ]
    }

    #[test]
    fn event_defaults_to_first_sorted() {
        let config = ScioConfig::default();
        assert_eq!(resolve_event(&bank(), None, &config).unwrap(), "Astronomy");
    }

    #[test]
    fn requested_event_beats_config() {
        let config = ScioConfig {
            default_event: Some("Astronomy".into()),
            ..ScioConfig::default()
        };
        assert_eq!(
            resolve_event(&bank(), Some("Forensics"), &config).unwrap(),
            "Forensics"
        );
        assert_eq!(resolve_event(&bank(), None, &config).unwrap(), "Astronomy");
    }

    #[test]
    fn unknown_event_lists_available() {
        let err = resolve_event(&bank(), Some("Optics"), &ScioConfig::default()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Optics"));
        assert!(msg.contains("Astronomy, Forensics"));
    }

    #[test]
    fn list_parsing() {
        assert_eq!(parse_list("Easy, Hard,,"), vec!["Easy", "Hard"]);
        assert!(parse_list(" ").is_empty());
    }
}
