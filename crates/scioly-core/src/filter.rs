//! Topic/difficulty selection and shuffling.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::Question;

/// The selected topics and difficulties for one event.
///
/// A question passes only if both its topic and its difficulty are in the
/// selection. `"Unknown"` is an ordinary value: it passes when selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub topics: BTreeSet<String>,
    pub difficulties: BTreeSet<String>,
}

impl Filter {
    pub fn new<T, D>(topics: T, difficulties: D) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        Self {
            topics: topics.into_iter().map(Into::into).collect(),
            difficulties: difficulties.into_iter().map(Into::into).collect(),
        }
    }

    /// Select every topic and difficulty present in `bank` for `event`.
    pub fn for_event(bank: &[Question], event: &str) -> Self {
        Self {
            topics: topics(bank, event).into_iter().collect(),
            difficulties: difficulties(bank, event).into_iter().collect(),
        }
    }

    pub fn matches(&self, question: &Question) -> bool {
        self.topics.contains(&question.topic) && self.difficulties.contains(&question.difficulty)
    }
}

/// Distinct event names in the bank, sorted.
pub fn events(bank: &[Question]) -> Vec<String> {
    distinct(bank.iter().map(|q| &q.event))
}

/// Distinct topics for `event`, sorted.
pub fn topics(bank: &[Question], event: &str) -> Vec<String> {
    distinct(bank.iter().filter(|q| q.event == event).map(|q| &q.topic))
}

/// Distinct difficulties for `event`, sorted.
pub fn difficulties(bank: &[Question], event: &str) -> Vec<String> {
    distinct(
        bank.iter()
            .filter(|q| q.event == event)
            .map(|q| &q.difficulty),
    )
}

fn distinct<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    values
        .collect::<BTreeSet<_>>()
        .into_iter()
        .cloned()
        .collect()
}

/// Questions of `event` that pass `selection`, in bank order.
pub fn filter(bank: &[Question], event: &str, selection: &Filter) -> Vec<Question> {
    let matched: Vec<Question> = bank
        .iter()
        .filter(|q| q.event == event && selection.matches(q))
        .cloned()
        .collect();

    if matched.is_empty() {
        tracing::warn!("no questions in {event} match the selected topics and difficulties");
    }

    matched
}

/// Return `questions` in a random order.
pub fn shuffle<R: Rng + ?Sized>(mut questions: Vec<Question>, rng: &mut R) -> Vec<Question> {
    questions.shuffle(rng);
    questions
}
