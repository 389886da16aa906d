//! The `scioly add` command.

use anyhow::Result;

use scioly_core::{bank, Question};

use crate::BankArgs;

/// Fields of a question entered on the command line.
#[derive(Debug, Clone, Default)]
pub struct NewQuestion {
    pub event: Option<String>,
    pub question: String,
    pub answer: String,
    pub topic: Option<String>,
    pub difficulty: Option<String>,
    pub options: Vec<String>,
    pub hint: Option<String>,
}

impl NewQuestion {
    /// Build the question; a missing or blank event, topic or difficulty
    /// stays `Unknown`.
    pub fn into_question(self) -> Question {
        let mut q = Question::new(self.question.trim(), self.answer.trim()).with_options(
            self.options
                .iter()
                .map(|o| o.trim())
                .filter(|o| !o.is_empty()),
        );
        if let Some(event) = self.event.filter(|e| !e.trim().is_empty()) {
            q = q.with_event(event.trim());
        }
        if let Some(topic) = self.topic.filter(|t| !t.trim().is_empty()) {
            q = q.with_topic(topic.trim());
        }
        if let Some(difficulty) = self.difficulty.filter(|d| !d.trim().is_empty()) {
            q = q.with_difficulty(difficulty.trim());
        }
        if let Some(hint) = self.hint.filter(|h| !h.trim().is_empty()) {
            q = q.with_hint(hint.trim());
        }
        q
    }
}

pub fn execute(args: BankArgs, new: NewQuestion) -> Result<()> {
    let config = super::load_config(&args)?;
    let question = new.into_question();
    let event = question.event.clone();
    let total = bank::append_question(&config.bank_path, question)?;
    println!(
        "Added question to {event}. {} now holds {total} question(s).",
        config.bank_path.display()
    );
    Ok(())
}
