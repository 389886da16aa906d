//! The `scioly study` and `scioly drill` commands.

use std::io::Write;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use scioly_core::clock::SystemClock;
use scioly_core::config::ScioConfig;
use scioly_core::runner::{self, RunSummary, StopReason};
use scioly_core::{Question, QuizSession};

use super::{load_config, load_questions, output_dir, parse_list, resolve_event};
use crate::export::{export, saved_message, Formats};
use crate::terminal::Terminal;
use crate::QuizArgs;

pub fn study(args: QuizArgs) -> Result<()> {
    let (config, mut session) = prepare(&args)?;
    let questions = ordered(&session, &args, &config);
    if questions.is_empty() {
        println!("{}", no_questions_message(&session));
        return Ok(());
    }

    let stdin = std::io::stdin();
    let mut terminal = Terminal::new(stdin.lock(), std::io::stdout());
    terminal.say(format!(
        "Study: {} ({} questions)",
        session.event(),
        questions.len()
    ))?;
    let summary = runner::run_study_mode(&mut session, &questions, &mut terminal)?;

    finish(&session, &summary, &args, &config)
}

pub fn drill(args: QuizArgs, limit: Option<String>) -> Result<()> {
    let (config, mut session) = prepare(&args)?;
    let questions = ordered(&session, &args, &config);
    if questions.is_empty() {
        println!("{}", no_questions_message(&session));
        return Ok(());
    }

    let (limit_secs, warning) =
        parse_limit(limit.as_deref(), questions.len(), config.seconds_per_question);
    if let Some(warning) = warning {
        println!("{warning}");
    }

    let stdin = std::io::stdin();
    let mut terminal = Terminal::new(stdin.lock(), std::io::stdout());
    terminal.say(format!(
        "Timed drill: {} ({} questions, {limit_secs}s)",
        session.event(),
        questions.len()
    ))?;
    let summary =
        runner::run_timed_drill(&mut session, &questions, &mut terminal, &SystemClock, limit_secs)?;

    finish(&session, &summary, &args, &config)
}

/// Load config and bank, pick the event and apply any topic or difficulty
/// selection from the command line.
fn prepare(args: &QuizArgs) -> Result<(ScioConfig, QuizSession)> {
    Formats::parse(&args.format)?;
    let config = load_config(&args.bank)?;
    let questions = load_questions(&config)?;
    let event = resolve_event(&questions, args.event.as_deref(), &config)?;

    let mut session = QuizSession::new(questions, event);
    let mut selection = session.filter().clone();
    if let Some(topics) = &args.topics {
        selection.topics = parse_list(topics).into_iter().collect();
    }
    if let Some(difficulties) = &args.difficulties {
        selection.difficulties = parse_list(difficulties).into_iter().collect();
    }
    session.set_filter(selection);

    Ok((config, session))
}

fn ordered(session: &QuizSession, args: &QuizArgs, config: &ScioConfig) -> Vec<Question> {
    order_questions(
        session,
        config.shuffle && !args.no_shuffle,
        args.seed.or(config.seed),
    )
}

/// The session's filtered questions, shuffled unless `shuffle` is off.
pub fn order_questions(session: &QuizSession, shuffle: bool, seed: Option<u64>) -> Vec<Question> {
    if !shuffle {
        return session.filtered_questions();
    }
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    session.shuffled_questions(&mut rng)
}

pub fn no_questions_message(session: &QuizSession) -> String {
    format!(
        "No questions match the selected topics and difficulties for {}.",
        session.event()
    )
}

/// Parse a drill time limit in whole seconds.
///
/// Anything that is not a positive integer falls back to
/// `seconds_per_question` for each question, with a warning to show.
pub fn parse_limit(
    raw: Option<&str>,
    question_count: usize,
    seconds_per_question: u64,
) -> (u64, Option<String>) {
    let fallback = runner::default_time_limit(question_count, seconds_per_question);
    match raw.map(str::trim) {
        None | Some("") => (fallback, None),
        Some(raw) => match raw.parse::<u64>() {
            Ok(secs) if secs > 0 => (secs, None),
            _ => (
                fallback,
                Some(format!(
                    "Invalid time limit '{raw}', using {fallback} seconds."
                )),
            ),
        },
    }
}

/// Print the run result line.
pub fn print_run_summary(
    out: &mut impl Write,
    session: &QuizSession,
    summary: &RunSummary,
) -> Result<()> {
    writeln!(out)?;
    match summary.stop {
        StopReason::Quit => writeln!(out, "Stopped early.")?,
        StopReason::TimeUp | StopReason::Exhausted => {}
    }
    writeln!(
        out,
        "{} {}: {}/{} correct, {} selected. Event score: {}",
        summary.mode,
        session.event(),
        summary.correct,
        summary.presented,
        summary.total,
        session.current_score()
    )?;
    Ok(())
}

fn finish(
    session: &QuizSession,
    summary: &RunSummary,
    args: &QuizArgs,
    config: &ScioConfig,
) -> Result<()> {
    let mut stdout = std::io::stdout();
    print_run_summary(&mut stdout, session, summary)?;

    println!("\nCheat sheet:");
    println!("{}", session.generate_report());

    let dir = output_dir(args.output.clone(), config);
    for path in export(session, &dir, &args.format)? {
        println!("{}", saved_message(&path));
    }
    Ok(())
}
