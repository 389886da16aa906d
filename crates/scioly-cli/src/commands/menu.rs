//! The `scioly menu` command: a numbered text menu over one session.

use std::io::{BufRead, Write};

use anyhow::Result;

use scioly_core::clock::{Clock, SystemClock};
use scioly_core::config::ScioConfig;
use scioly_core::filter::{self, Filter};
use scioly_core::report::NOTHING_ANSWERED;
use scioly_core::runner;
use scioly_core::{bank, QuizSession};

use super::add::NewQuestion;
use super::quiz::{no_questions_message, order_questions, parse_limit, print_run_summary};
use super::view::question_table;
use super::{load_config, load_questions, parse_list, resolve_event};
use crate::export::{export, saved_message};
use crate::terminal::Terminal;
use crate::BankArgs;

const MENU: &str = "\
1. Add question
2. View questions
3. Study
4. Timed drill
5. Export cheat sheet
6. Reset progress
7. Change event
8. Exit";

pub fn execute(args: BankArgs, event: Option<String>) -> Result<()> {
    let config = load_config(&args)?;
    let questions = load_questions(&config)?;
    let event = resolve_event(&questions, event.as_deref(), &config)?;
    let mut session = QuizSession::new(questions, event);

    let stdin = std::io::stdin();
    let mut terminal = Terminal::new(stdin.lock(), std::io::stdout());
    run(&mut terminal, &mut session, &config, &SystemClock)
}

/// Show the menu until the user exits or input ends.
pub fn run<R: BufRead, W: Write>(
    terminal: &mut Terminal<R, W>,
    session: &mut QuizSession,
    config: &ScioConfig,
    clock: &dyn Clock,
) -> Result<()> {
    loop {
        terminal.say(format!(
            "\n== {} (score {}) ==\n{MENU}",
            session.event(),
            session.current_score()
        ))?;
        let Some(choice) = terminal.prompt("Choose an option: ")? else {
            break;
        };
        match choice.as_str() {
            "1" => add_question(terminal, session, config)?,
            "2" => view_questions(terminal, session)?,
            "3" => study(terminal, session, config)?,
            "4" => drill(terminal, session, config, clock)?,
            "5" => export_sheet(terminal, session, config)?,
            "6" => {
                session.reset_progress();
                terminal.say(format!("Progress reset for {}.", session.event()))?;
            }
            "7" => change_event(terminal, session)?,
            "8" | "q" => break,
            other => {
                terminal.say(format!("Invalid choice '{other}'. Enter a number from 1 to 8."))?
            }
        }
    }
    terminal.say("Goodbye!")?;
    Ok(())
}

fn add_question<R: BufRead, W: Write>(
    terminal: &mut Terminal<R, W>,
    session: &mut QuizSession,
    config: &ScioConfig,
) -> Result<()> {
    let Some(question) = terminal.prompt("Question: ")? else {
        return Ok(());
    };
    let Some(answer) = terminal.prompt("Answer: ")? else {
        return Ok(());
    };
    let event = session.event().to_string();
    let Some(event) = terminal.prompt_or("Event", &event)? else {
        return Ok(());
    };
    let topic = terminal.prompt("Topic (blank for Unknown): ")?;
    let difficulty = terminal.prompt("Difficulty (blank for Unknown): ")?;
    let options = terminal.prompt("Options, comma-separated (blank for none): ")?;
    let hint = terminal.prompt("Hint (optional): ")?;

    let question = NewQuestion {
        event: Some(event),
        question,
        answer,
        topic,
        difficulty,
        options: options.as_deref().map(parse_list).unwrap_or_default(),
        hint,
    }
    .into_question();

    match bank::append_question(&config.bank_path, question.clone()) {
        Ok(total) => {
            terminal.say(format!(
                "Added question to {}. Bank now holds {total} question(s).",
                question.event
            ))?;
            session.add_question(question);
        }
        Err(e) => terminal.say(format!("Could not add question: {e:#}"))?,
    }
    Ok(())
}

fn view_questions<R: BufRead, W: Write>(
    terminal: &mut Terminal<R, W>,
    session: &QuizSession,
) -> Result<()> {
    let shown = session.filtered_questions();
    if shown.is_empty() {
        return terminal.say(no_questions_message(session));
    }
    let refs: Vec<_> = shown.iter().collect();
    terminal.say(question_table(&refs).to_string())
}

fn study<R: BufRead, W: Write>(
    terminal: &mut Terminal<R, W>,
    session: &mut QuizSession,
    config: &ScioConfig,
) -> Result<()> {
    let questions = order_questions(session, config.shuffle, config.seed);
    if questions.is_empty() {
        return terminal.say(no_questions_message(session));
    }
    let summary = runner::run_study_mode(session, &questions, terminal)?;
    print_run_summary(terminal.output(), session, &summary)
}

fn drill<R: BufRead, W: Write>(
    terminal: &mut Terminal<R, W>,
    session: &mut QuizSession,
    config: &ScioConfig,
    clock: &dyn Clock,
) -> Result<()> {
    let questions = order_questions(session, config.shuffle, config.seed);
    if questions.is_empty() {
        return terminal.say(no_questions_message(session));
    }
    let default = runner::default_time_limit(questions.len(), config.seconds_per_question);
    let Some(raw) = terminal.prompt(&format!("Time limit in seconds [{default}]: "))? else {
        return Ok(());
    };
    let (limit_secs, warning) =
        parse_limit(Some(&raw), questions.len(), config.seconds_per_question);
    if let Some(warning) = warning {
        terminal.say(warning)?;
    }

    let summary = runner::run_timed_drill(session, &questions, terminal, clock, limit_secs)?;
    print_run_summary(terminal.output(), session, &summary)
}

fn export_sheet<R: BufRead, W: Write>(
    terminal: &mut Terminal<R, W>,
    session: &QuizSession,
    config: &ScioConfig,
) -> Result<()> {
    let sheet = session.generate_report();
    if sheet.is_empty() {
        return terminal.say(NOTHING_ANSWERED);
    }
    terminal.say(sheet.to_string())?;
    for path in export(session, &config.output_dir, "text")? {
        terminal.say(saved_message(&path))?;
    }
    Ok(())
}

fn change_event<R: BufRead, W: Write>(
    terminal: &mut Terminal<R, W>,
    session: &mut QuizSession,
) -> Result<()> {
    let events = filter::events(session.bank());
    for (i, event) in events.iter().enumerate() {
        terminal.say(format!("  {}) {event}", i + 1))?;
    }
    let Some(reply) = terminal.prompt("Event: ")? else {
        return Ok(());
    };
    let picked = match reply.parse::<usize>() {
        Ok(n) if (1..=events.len()).contains(&n) => Some(events[n - 1].clone()),
        _ => events.iter().find(|e| **e == reply).cloned(),
    };
    let Some(event) = picked else {
        return terminal.say(format!("No event '{reply}'. Keeping {}.", session.event()));
    };
    session.select_event(event);

    let topics = filter::topics(session.bank(), session.event());
    let difficulties = filter::difficulties(session.bank(), session.event());
    terminal.say(format!("Topics: {}", topics.join(", ")))?;
    let topic_reply = terminal.prompt("Topics to include (blank for all): ")?;
    terminal.say(format!("Difficulties: {}", difficulties.join(", ")))?;
    let difficulty_reply = terminal.prompt("Difficulties to include (blank for all): ")?;

    let pick = |reply: Option<String>, all: Vec<String>| match reply.as_deref().map(parse_list) {
        Some(list) if !list.is_empty() => list,
        _ => all,
    };
    session.set_filter(Filter::new(
        pick(topic_reply, topics),
        pick(difficulty_reply, difficulties),
    ));

    let count = session.filtered_questions().len();
    terminal.say(format!("Now studying {} ({count} questions).", session.event()))
}
