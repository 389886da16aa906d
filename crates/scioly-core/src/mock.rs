//! Scripted frontend for testing.

use std::collections::VecDeque;
use std::rc::Rc;

use anyhow::Result;
use chrono::{DateTime, TimeDelta, Utc};

use crate::clock::{Clock, ManualClock};
use crate::model::AnswerOutcome;
use crate::runner::{QuestionPrompt, QuizFrontend};

/// A frontend that answers from a fixed script and records what it was shown.
///
/// When the script runs out, the next `present` call ends the run. With a
/// clock attached, every answer takes `secs_per_answer` seconds.
pub struct ScriptedFrontend {
    answers: VecDeque<String>,
    clock: Option<(Rc<ManualClock>, i64)>,
    presented_keys: Vec<String>,
    presented_at: Vec<DateTime<Utc>>,
    remaining: Vec<Option<TimeDelta>>,
    outcomes: Vec<AnswerOutcome>,
    time_up: bool,
}

impl ScriptedFrontend {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            clock: None,
            presented_keys: Vec::new(),
            presented_at: Vec::new(),
            remaining: Vec::new(),
            outcomes: Vec::new(),
            time_up: false,
        }
    }

    /// Advance `clock` by `secs_per_answer` each time a question is answered.
    pub fn with_clock(mut self, clock: Rc<ManualClock>, secs_per_answer: i64) -> Self {
        self.clock = Some((clock, secs_per_answer));
        self
    }

    /// Keys of the questions shown, as `<mode>-<index>`.
    pub fn presented_keys(&self) -> Vec<String> {
        self.presented_keys.clone()
    }

    /// Clock readings at the moment each question was shown.
    pub fn presented_at(&self) -> &[DateTime<Utc>] {
        &self.presented_at
    }

    pub fn remaining(&self) -> &[Option<TimeDelta>] {
        &self.remaining
    }

    pub fn outcomes(&self) -> &[AnswerOutcome] {
        &self.outcomes
    }

    pub fn time_up_called(&self) -> bool {
        self.time_up
    }
}

impl QuizFrontend for ScriptedFrontend {
    fn present(&mut self, prompt: &QuestionPrompt<'_>) -> Result<Option<String>> {
        self.presented_keys.push(prompt.key.to_string());
        self.remaining.push(prompt.remaining);
        if let Some((clock, _)) = &self.clock {
            self.presented_at.push(clock.now());
        }

        let Some(answer) = self.answers.pop_front() else {
            return Ok(None);
        };

        if let Some((clock, secs)) = &self.clock {
            clock.advance_secs(*secs);
        }
        Ok(Some(answer))
    }

    fn on_answer(&mut self, outcome: &AnswerOutcome) {
        self.outcomes.push(outcome.clone());
    }

    fn on_time_up(&mut self, _presented: usize, _total: usize) {
        self.time_up = true;
    }
}
