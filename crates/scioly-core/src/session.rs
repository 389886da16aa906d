//! In-memory quiz session state.
//!
//! A [`QuizSession`] owns the loaded bank, the current event and filter, the
//! per-event score and the answered-question log. Runners and frontends
//! receive it by `&mut` instead of reaching for shared state.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;

use crate::filter::{self, Filter};
use crate::model::{Mode, Question, QuestionKey};
use crate::report::{CheatSheet, SessionSummary};

/// Progress through a timed drill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrillState {
    /// Number of questions already shown.
    pub index: usize,
    /// No question is shown after this instant.
    pub deadline: DateTime<Utc>,
}

/// What the drill should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrillStep {
    /// Show the question at this 0-based position.
    Present(usize),
    /// The deadline has passed.
    TimeUp,
    /// Every question has been shown.
    Exhausted,
    /// No drill is running.
    Inactive,
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    bank: Vec<Question>,
    event: String,
    filter: Filter,
    mode: Mode,
    scores: BTreeMap<String, u32>,
    log: Vec<String>,
    /// `(event, question text)` of every logged question.
    logged: HashSet<(String, String)>,
    drill: Option<DrillState>,
}

impl QuizSession {
    /// Start a session on `event`, selecting every topic and difficulty it has.
    pub fn new(bank: Vec<Question>, event: impl Into<String>) -> Self {
        let event = event.into();
        let filter = Filter::for_event(&bank, &event);
        Self {
            bank,
            event,
            filter,
            mode: Mode::Study,
            scores: BTreeMap::new(),
            log: Vec::new(),
            logged: HashSet::new(),
            drill: None,
        }
    }

    pub fn bank(&self) -> &[Question] {
        &self.bank
    }

    pub fn event(&self) -> &str {
        &self.event
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Switch to another event.
    ///
    /// The filter is reset to everything the new event has, and the
    /// answered log (which belongs to one event's cheat sheet) is cleared.
    /// Scores of every event are kept.
    pub fn select_event(&mut self, event: impl Into<String>) {
        self.event = event.into();
        self.filter = Filter::for_event(&self.bank, &self.event);
        self.log.clear();
        self.logged.clear();
        self.drill = None;
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Add a question to the in-memory bank.
    ///
    /// If it belongs to the current event, its topic and difficulty join the
    /// current selection so it is not hidden by a filter built before it
    /// existed.
    pub fn add_question(&mut self, question: Question) {
        if question.event == self.event {
            self.filter.topics.insert(question.topic.clone());
            self.filter.difficulties.insert(question.difficulty.clone());
        }
        self.bank.push(question);
    }

    /// Questions of the current event that pass the current filter.
    pub fn filtered_questions(&self) -> Vec<Question> {
        filter::filter(&self.bank, &self.event, &self.filter)
    }

    /// The filtered questions in a fresh random order.
    pub fn shuffled_questions<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Question> {
        filter::shuffle(self.filtered_questions(), rng)
    }

    /// Score `choice` against `question`.
    ///
    /// Returns `true` iff the choice is exactly the stored answer, in which
    /// case the question's event score goes up by one.
    pub fn submit_answer(&mut self, question: &Question, choice: &str) -> bool {
        let correct = question.is_correct(choice);
        if correct {
            *self.scores.entry(question.event.clone()).or_insert(0) += 1;
        }
        correct
    }

    /// Append the cheat sheet line for `question` shown at `key`.
    ///
    /// A question is logged at most once, whatever position it was shown
    /// at; the return value says whether the log grew.
    pub fn log_answered(&mut self, key: QuestionKey, question: &Question) -> bool {
        let identity = (question.event.clone(), question.text.clone());
        if !self.logged.insert(identity) {
            tracing::debug!("{key} already in the answered log");
            return false;
        }
        self.log.push(question.cheat_sheet_line(key.index));
        true
    }

    pub fn score(&self, event: &str) -> u32 {
        self.scores.get(event).copied().unwrap_or(0)
    }

    pub fn current_score(&self) -> u32 {
        self.score(&self.event)
    }

    pub fn scores(&self) -> &BTreeMap<String, u32> {
        &self.scores
    }

    pub fn answered_log(&self) -> &[String] {
        &self.log
    }

    /// Clear the answered log and zero the current event's score.
    pub fn reset_progress(&mut self) {
        self.log.clear();
        self.logged.clear();
        self.scores.insert(self.event.clone(), 0);
        self.drill = None;
    }

    /// Start a drill that runs until `now + limit_secs`.
    pub fn begin_drill(&mut self, now: DateTime<Utc>, limit_secs: u64) -> DateTime<Utc> {
        let deadline = i64::try_from(limit_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|limit| now.checked_add_signed(limit))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.mode = Mode::Drill;
        self.drill = Some(DrillState { index: 0, deadline });
        deadline
    }

    pub fn drill_state(&self) -> Option<DrillState> {
        self.drill
    }

    /// Decide whether the next of `total` drill questions may be shown at `now`.
    ///
    /// Presenting advances the drill index. Once the deadline has passed no
    /// further question is presented.
    pub fn next_drill_step(&mut self, now: DateTime<Utc>, total: usize) -> DrillStep {
        let Some(state) = self.drill.as_mut() else {
            return DrillStep::Inactive;
        };
        if state.index >= total {
            return DrillStep::Exhausted;
        }
        if now > state.deadline {
            tracing::debug!(
                "drill deadline {} passed after {} questions",
                state.deadline,
                state.index
            );
            return DrillStep::TimeUp;
        }
        let position = state.index;
        state.index += 1;
        DrillStep::Present(position)
    }

    pub fn end_drill(&mut self) {
        self.drill = None;
    }

    /// The cheat sheet for the current event.
    pub fn generate_report(&self) -> CheatSheet {
        CheatSheet::from_log(&self.event, &self.log)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: uuid::Uuid::new_v4(),
            created_at: Utc::now(),
            event: self.event.clone(),
            scores: self.scores.clone(),
            answered: self.log.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};
    use crate::report::NOTHING_ANSWERED;

    fn bank() -> Vec<Question> {
        vec![
            Question::new("Which technique separates DNA fragments?", "Electrophoresis")
                .with_event("Forensics")
                .with_topic("DNA")
                .with_difficulty("Easy")
                .with_options([
                    "Chromatography",
                    "Electrophoresis",
                    "Spectroscopy",
                    "Centrifugation",
                ]),
            Question::new("Fingerprints are classified into how many main types?", "3")
                .with_event("Forensics")
                .with_topic("Fingerprints")
                .with_difficulty("Medium")
                .with_options(["2", "3", "4", "5"]),
            Question::new("Ohm's Law formula is?", "V=IR").with_event("Circuit Lab"),
        ]
    }

    #[test]
    fn new_session_selects_whole_event() {
        let session = QuizSession::new(bank(), "Forensics");
        assert_eq!(session.filtered_questions().len(), 2);
        assert_eq!(session.mode(), Mode::Study);
        assert_eq!(session.current_score(), 0);
    }

    #[test]
    fn correct_answer_increments_event_score() {
        let mut session = QuizSession::new(bank(), "Forensics");
        let q = session.bank()[0].clone();

        assert!(session.submit_answer(&q, "Electrophoresis"));
        assert_eq!(session.score("Forensics"), 1);

        assert!(!session.submit_answer(&q, "Chromatography"));
        assert_eq!(session.score("Forensics"), 1);

        assert!(session.submit_answer(&q, "Electrophoresis"));
        assert_eq!(session.score("Forensics"), 2);
        assert_eq!(session.score("Circuit Lab"), 0);
    }

    #[test]
    fn score_is_per_question_event() {
        let mut session = QuizSession::new(bank(), "Forensics");
        let ohm = session.bank()[2].clone();
        assert!(session.submit_answer(&ohm, "V=IR"));
        assert_eq!(session.score("Circuit Lab"), 1);
        assert_eq!(session.current_score(), 0);
    }

    #[test]
    fn question_is_logged_once() {
        let mut session = QuizSession::new(bank(), "Forensics");
        let q = session.bank()[0].clone();
        let key = QuestionKey::new(Mode::Study, 1);

        assert!(session.log_answered(key, &q));
        assert!(!session.log_answered(key, &q));
        assert!(!session.log_answered(QuestionKey::new(Mode::Drill, 2), &q));
        assert_eq!(session.answered_log().len(), 1);
    }

    #[test]
    fn reset_allows_logging_again() {
        let mut session = QuizSession::new(bank(), "Forensics");
        let q = session.bank()[0].clone();
        session.log_answered(QuestionKey::new(Mode::Study, 1), &q);
        session.reset_progress();
        assert!(session.log_answered(QuestionKey::new(Mode::Study, 2), &q));
        assert_eq!(
            session.answered_log(),
            ["Q2: Which technique separates DNA fragments? - Answer: Electrophoresis"]
        );
    }

    #[test]
    fn reset_zeroes_current_event_only() {
        let mut session = QuizSession::new(bank(), "Forensics");
        let dna = session.bank()[0].clone();
        let ohm = session.bank()[2].clone();
        session.submit_answer(&dna, "Electrophoresis");
        session.submit_answer(&ohm, "V=IR");
        session.log_answered(QuestionKey::new(Mode::Study, 1), &dna);

        session.reset_progress();

        assert_eq!(session.current_score(), 0);
        assert_eq!(session.scores().get("Forensics"), Some(&0));
        assert_eq!(session.score("Circuit Lab"), 1);
        assert!(session.answered_log().is_empty());
    }

    #[test]
    fn report_of_empty_log() {
        let session = QuizSession::new(bank(), "Forensics");
        let sheet = session.generate_report();
        assert!(sheet.is_empty());
        assert_eq!(sheet.to_string(), NOTHING_ANSWERED);
    }

    #[test]
    fn report_lists_answered_questions() {
        let mut session = QuizSession::new(bank(), "Forensics");
        let q = session.bank()[1].clone();
        session.log_answered(QuestionKey::new(Mode::Study, 1), &q);
        let text = session.generate_report().text().unwrap();
        assert_eq!(
            text,
            "Q1: Fingerprints are classified into how many main types? - Answer: 3"
        );
    }

    #[test]
    fn select_event_resets_filter_and_log() {
        let mut session = QuizSession::new(bank(), "Forensics");
        let q = session.bank()[0].clone();
        session.submit_answer(&q, "Electrophoresis");
        session.log_answered(QuestionKey::new(Mode::Study, 1), &q);
        session.set_filter(Filter::new(["DNA"], ["Easy"]));

        session.select_event("Circuit Lab");

        assert_eq!(session.event(), "Circuit Lab");
        assert_eq!(session.filtered_questions().len(), 1);
        assert!(session.answered_log().is_empty());
        assert_eq!(session.score("Forensics"), 1);
    }

    #[test]
    fn added_question_joins_current_selection() {
        let mut session = QuizSession::new(bank(), "Forensics");
        session.add_question(
            Question::new("Hair medulla patterns?", "Continuous")
                .with_event("Forensics")
                .with_topic("Hair")
                .with_difficulty("Hard"),
        );
        assert_eq!(session.filtered_questions().len(), 3);
    }

    #[test]
    fn drill_stops_at_deadline() {
        let clock = ManualClock::fixed();
        let mut session = QuizSession::new(bank(), "Forensics");
        let deadline = session.begin_drill(clock.now(), 60);
        assert_eq!(session.mode(), Mode::Drill);
        assert_eq!(deadline - clock.now(), TimeDelta::seconds(60));

        assert_eq!(session.next_drill_step(clock.now(), 2), DrillStep::Present(0));

        clock.advance_secs(60);
        assert_eq!(session.next_drill_step(clock.now(), 2), DrillStep::Present(1));

        assert_eq!(session.next_drill_step(clock.now(), 3), DrillStep::Present(2));
        clock.advance_secs(1);
        assert_eq!(session.next_drill_step(clock.now(), 4), DrillStep::TimeUp);
        assert_eq!(session.drill_state().unwrap().index, 3);
    }

    #[test]
    fn drill_exhausts_before_time_up() {
        let clock = ManualClock::fixed();
        let mut session = QuizSession::new(bank(), "Forensics");
        session.begin_drill(clock.now(), 10);
        assert_eq!(session.next_drill_step(clock.now(), 1), DrillStep::Present(0));
        clock.advance_secs(100);
        assert_eq!(session.next_drill_step(clock.now(), 1), DrillStep::Exhausted);
    }

    #[test]
    fn drill_without_begin_is_inactive() {
        let clock = ManualClock::fixed();
        let mut session = QuizSession::new(bank(), "Forensics");
        assert_eq!(session.next_drill_step(clock.now(), 2), DrillStep::Inactive);
        session.begin_drill(clock.now(), 5);
        session.end_drill();
        assert_eq!(session.next_drill_step(clock.now(), 2), DrillStep::Inactive);
    }

    #[test]
    fn huge_limit_does_not_overflow() {
        let clock = ManualClock::fixed();
        let mut session = QuizSession::new(bank(), "Forensics");
        let deadline = session.begin_drill(clock.now(), u64::MAX);
        assert_eq!(deadline, DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn summary_snapshot() {
        let mut session = QuizSession::new(bank(), "Forensics");
        let q = session.bank()[0].clone();
        session.submit_answer(&q, "Electrophoresis");
        session.log_answered(QuestionKey::new(Mode::Drill, 1), &q);
        let summary = session.summary();
        assert_eq!(summary.event, "Forensics");
        assert_eq!(summary.scores.get("Forensics"), Some(&1));
        assert_eq!(summary.answered.len(), 1);
    }
}
