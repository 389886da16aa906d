//! Cheat sheet and session summary exports.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shown instead of a cheat sheet when nothing has been answered.
pub const NOTHING_ANSWERED: &str = "No questions answered yet!";

/// The answered-question log of one event, ready for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CheatSheet {
    /// Nothing has been answered; there is no report to export.
    NothingAnswered { event: String },
    /// One line per answered question.
    Ready { event: String, lines: Vec<String> },
}

impl CheatSheet {
    pub fn from_log(event: &str, log: &[String]) -> Self {
        if log.is_empty() {
            CheatSheet::NothingAnswered {
                event: event.to_string(),
            }
        } else {
            CheatSheet::Ready {
                event: event.to_string(),
                lines: log.to_vec(),
            }
        }
    }

    pub fn event(&self) -> &str {
        match self {
            CheatSheet::NothingAnswered { event } | CheatSheet::Ready { event, .. } => event,
        }
    }

    pub fn lines(&self) -> &[String] {
        match self {
            CheatSheet::NothingAnswered { .. } => &[],
            CheatSheet::Ready { lines, .. } => lines,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CheatSheet::NothingAnswered { .. })
    }

    /// The report text, or `None` when nothing has been answered.
    pub fn text(&self) -> Option<String> {
        match self {
            CheatSheet::NothingAnswered { .. } => None,
            CheatSheet::Ready { lines, .. } => Some(lines.join("\n")),
        }
    }

    /// `<event>_cheatsheet.txt`
    pub fn file_name(&self) -> String {
        cheat_sheet_file_name(self.event())
    }

    /// Write the text report into `dir`.
    ///
    /// Returns the written path, or `None` if nothing has been answered.
    pub fn write_to_dir(&self, dir: &Path) -> Result<Option<PathBuf>> {
        let Some(text) = self.text() else {
            return Ok(None);
        };
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        let path = dir.join(self.file_name());
        std::fs::write(&path, text)
            .with_context(|| format!("failed to write cheat sheet to {}", path.display()))?;
        Ok(Some(path))
    }
}

impl fmt::Display for CheatSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheatSheet::NothingAnswered { .. } => f.write_str(NOTHING_ANSWERED),
            CheatSheet::Ready { lines, .. } => f.write_str(&lines.join("\n")),
        }
    }
}

/// `<event>_cheatsheet.txt`, with path separators in the event replaced.
pub fn cheat_sheet_file_name(event: &str) -> String {
    format!("{}_cheatsheet.txt", file_stem(event))
}

/// An event name made safe to use as a file name prefix.
pub fn file_stem(event: &str) -> String {
    event
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            c => c,
        })
        .collect()
}

/// A snapshot of a session's scores and answered log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Unique summary identifier.
    pub id: Uuid,
    /// When the summary was taken.
    pub created_at: DateTime<Utc>,
    /// The event that was being studied.
    pub event: String,
    /// Correct answers per event.
    pub scores: BTreeMap<String, u32>,
    /// Answered-question log lines.
    pub answered: Vec<String>,
}

impl SessionSummary {
    /// `<event>_session.json`
    pub fn file_name(&self) -> String {
        format!("{}_session.json", file_stem(&self.event))
    }

    /// Save the summary as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize summary")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
        Ok(())
    }

    /// Load a summary from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read summary from {}", path.display()))?;
        let summary: SessionSummary =
            serde_json::from_str(&content).context("failed to parse summary JSON")?;
        Ok(summary)
    }
}
