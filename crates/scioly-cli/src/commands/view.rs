//! The `scioly view` command.

use anyhow::Result;
use comfy_table::{ContentArrangement, Table};

use scioly_core::{bank, Question};

use crate::BankArgs;

pub fn execute(args: BankArgs, event: Option<String>, json: bool) -> Result<()> {
    let config = super::load_config(&args)?;
    let questions = bank::load_bank(&config.bank_path)?;

    let shown: Vec<&Question> = questions
        .iter()
        .filter(|q| event.as_deref().is_none_or(|e| q.event == e))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(());
    }

    if shown.is_empty() {
        match &event {
            Some(e) => println!("No questions for event '{e}'."),
            None => println!("No questions in the bank."),
        }
        return Ok(());
    }

    println!("{}", question_table(&shown));
    println!("{} question(s)", shown.len());
    Ok(())
}

pub fn question_table(questions: &[&Question]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "#",
        "Event",
        "Topic",
        "Difficulty",
        "Question",
        "Answer",
    ]);
    for (i, q) in questions.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            q.event.clone(),
            q.topic.clone(),
            q.difficulty.clone(),
            q.text.clone(),
            q.answer.clone(),
        ]);
    }
    table
}
