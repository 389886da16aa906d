//! Study and timed-drill runners.
//!
//! Both modes share one presentation step: show a question through a
//! [`QuizFrontend`], score the choice on the session, log the question for the
//! cheat sheet, and report the outcome back to the frontend. The drill adds a
//! deadline check before every question.

use anyhow::Result;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::model::{AnswerOutcome, Mode, Question, QuestionKey};
use crate::session::{DrillStep, QuizSession};

/// Everything a frontend needs to render one question.
#[derive(Debug, Clone)]
pub struct QuestionPrompt<'a> {
    pub key: QuestionKey,
    pub question: &'a Question,
    /// Number of questions in this run.
    pub total: usize,
    /// Time left before the drill deadline.
    pub remaining: Option<TimeDelta>,
}

/// The I/O side of a quiz run.
pub trait QuizFrontend {
    /// Show a question and wait for a choice. `None` ends the run early.
    fn present(&mut self, prompt: &QuestionPrompt<'_>) -> Result<Option<String>>;

    /// Called after a choice has been scored.
    fn on_answer(&mut self, outcome: &AnswerOutcome);

    /// Called when a drill stops because its deadline passed.
    fn on_time_up(&mut self, _presented: usize, _total: usize) {}
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Every question was shown.
    Exhausted,
    /// The drill deadline passed.
    TimeUp,
    /// The frontend ended the run.
    Quit,
}

/// Counts for one study or drill run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub mode: Mode,
    pub total: usize,
    pub presented: usize,
    pub correct: usize,
    pub stop: StopReason,
}

impl RunSummary {
    fn new(mode: Mode, total: usize) -> Self {
        Self {
            mode,
            total,
            presented: 0,
            correct: 0,
            stop: StopReason::Exhausted,
        }
    }

    fn record(&mut self, outcome: &AnswerOutcome) {
        self.presented += 1;
        if outcome.correct {
            self.correct += 1;
        }
    }
}

/// Present every question once, with no time bound.
pub fn run_study_mode(
    session: &mut QuizSession,
    questions: &[Question],
    frontend: &mut dyn QuizFrontend,
) -> Result<RunSummary> {
    session.set_mode(Mode::Study);
    let mut summary = RunSummary::new(Mode::Study, questions.len());

    for (i, question) in questions.iter().enumerate() {
        let prompt = QuestionPrompt {
            key: QuestionKey::new(Mode::Study, i + 1),
            question,
            total: questions.len(),
            remaining: None,
        };
        match ask(session, &prompt, frontend)? {
            Some(outcome) => summary.record(&outcome),
            None => {
                summary.stop = StopReason::Quit;
                break;
            }
        }
    }

    Ok(summary)
}

/// Present questions in order until they run out or `limit_secs` elapse.
///
/// The clock is read before each question; once it is past the deadline the
/// drill stops without showing another question. A question already on
/// screen is never cut short.
pub fn run_timed_drill(
    session: &mut QuizSession,
    questions: &[Question],
    frontend: &mut dyn QuizFrontend,
    clock: &dyn Clock,
    limit_secs: u64,
) -> Result<RunSummary> {
    let deadline = session.begin_drill(clock.now(), limit_secs);
    tracing::info!(
        "drill of {} questions, {limit_secs}s limit, deadline {deadline}",
        questions.len()
    );
    let mut summary = RunSummary::new(Mode::Drill, questions.len());

    loop {
        let now = clock.now();
        let position = match session.next_drill_step(now, questions.len()) {
            DrillStep::Present(position) => position,
            DrillStep::TimeUp => {
                summary.stop = StopReason::TimeUp;
                frontend.on_time_up(summary.presented, summary.total);
                break;
            }
            DrillStep::Exhausted | DrillStep::Inactive => break,
        };

        let prompt = QuestionPrompt {
            key: QuestionKey::new(Mode::Drill, position + 1),
            question: &questions[position],
            total: questions.len(),
            remaining: Some(remaining(deadline, now)),
        };
        match ask(session, &prompt, frontend)? {
            Some(outcome) => summary.record(&outcome),
            None => {
                summary.stop = StopReason::Quit;
                break;
            }
        }
    }

    session.end_drill();
    Ok(summary)
}

/// Default drill length: `seconds_per_question` for each question.
pub fn default_time_limit(question_count: usize, seconds_per_question: u64) -> u64 {
    (question_count as u64).saturating_mul(seconds_per_question)
}

fn remaining(deadline: DateTime<Utc>, now: DateTime<Utc>) -> TimeDelta {
    (deadline - now).max(TimeDelta::zero())
}

fn ask(
    session: &mut QuizSession,
    prompt: &QuestionPrompt<'_>,
    frontend: &mut dyn QuizFrontend,
) -> Result<Option<AnswerOutcome>> {
    let Some(choice) = frontend.present(prompt)? else {
        return Ok(None);
    };

    let question = prompt.question;
    let correct = session.submit_answer(question, &choice);
    session.log_answered(prompt.key, question);

    let outcome = AnswerOutcome {
        key: prompt.key,
        correct,
        choice,
        expected: question.answer.clone(),
    };
    frontend.on_answer(&outcome);
    Ok(Some(outcome))
}
