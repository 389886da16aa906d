//! The `scioly validate` command.

use anyhow::Result;

use scioly_core::{bank, filter};

use crate::BankArgs;

pub fn execute(args: BankArgs) -> Result<()> {
    let config = super::load_config(&args)?;
    let questions = bank::load_bank(&config.bank_path)?;
    let events = filter::events(&questions);

    println!(
        "Bank: {} questions in {} events",
        questions.len(),
        events.len()
    );
    for event in &events {
        let count = questions.iter().filter(|q| &q.event == event).count();
        println!("  {event}: {count}");
    }

    let warnings = bank::validate_bank(&questions);
    for w in &warnings {
        let prefix = w
            .question
            .map(|i| format!("  [#{i}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("All questions valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
