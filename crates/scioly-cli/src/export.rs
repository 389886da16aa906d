//! Cheat sheet export in the formats the CLI accepts.

use std::path::{Path, PathBuf};

use anyhow::Result;

use scioly_core::report::NOTHING_ANSWERED;
use scioly_core::QuizSession;

/// Which files an export writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Formats {
    pub text: bool,
    pub html: bool,
    pub json: bool,
}

impl Formats {
    /// Parse `text`, `html`, `json`, `all` or `none`, or a comma-separated
    /// combination such as `text,html`.
    pub fn parse(spec: &str) -> Result<Self> {
        let mut formats = Formats::default();
        for part in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part {
                "text" => formats.text = true,
                "html" => formats.html = true,
                "json" => formats.json = true,
                "all" => {
                    formats = Formats {
                        text: true,
                        html: true,
                        json: true,
                    }
                }
                "none" => {}
                other => anyhow::bail!(
                    "unknown output format '{other}'. Use text, html, json, all or none."
                ),
            }
        }
        Ok(formats)
    }

    pub fn is_none(&self) -> bool {
        !(self.text || self.html || self.json)
    }
}

/// Write the session's cheat sheet to `dir` in `format`.
///
/// Returns the paths written, for the caller to report. Nothing is written
/// when no question has been answered yet.
pub fn export(session: &QuizSession, dir: &Path, format: &str) -> Result<Vec<PathBuf>> {
    let formats = Formats::parse(format)?;
    if formats.is_none() {
        return Ok(Vec::new());
    }

    let sheet = session.generate_report();
    if sheet.is_empty() {
        tracing::warn!("{NOTHING_ANSWERED} Skipping {format} export.");
        return Ok(Vec::new());
    }

    let mut written = Vec::new();
    if formats.text {
        written.extend(sheet.write_to_dir(dir)?);
    }
    if formats.html {
        written.extend(scioly_report::write_html_cheat_sheet(&sheet, dir)?);
    }
    if formats.json {
        let summary = session.summary();
        let path = dir.join(summary.file_name());
        summary.save_json(&path)?;
        written.push(path);
    }

    for path in &written {
        tracing::info!("exported {}", path.display());
    }
    Ok(written)
}

pub fn saved_message(path: &Path) -> String {
    format!("Cheat sheet saved to {}", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scioly_core::model::{Mode, QuestionKey};
    use scioly_core::report::SessionSummary;
    use scioly_core::Question;

    fn answered_session() -> QuizSession {
        let q = Question::new("Brightest star?", "Sirius").with_event("Astronomy");
        let mut session = QuizSession::new(vec![q.clone()], "Astronomy");
        session.submit_answer(&q, "Sirius");
        session.log_answered(QuestionKey::new(Mode::Study, 1), &q);
        session
    }

    #[test]
    fn export_all_formats() {
        let dir = tempfile::tempdir().unwrap();
        let written = export(&answered_session(), dir.path(), "all").unwrap();

        assert_eq!(written.len(), 3);
        let text = std::fs::read_to_string(dir.path().join("Astronomy_cheatsheet.txt")).unwrap();
        assert_eq!(text, "Q1: Brightest star? - Answer: Sirius");
        assert!(dir.path().join("Astronomy_cheatsheet.html").exists());

        let summary = SessionSummary::load_json(&dir.path().join("Astronomy_session.json")).unwrap();
        assert_eq!(summary.scores["Astronomy"], 1);
    }

    #[test]
    fn nothing_answered_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let session = QuizSession::new(vec![Question::new("Q", "A")], "Unknown");
        assert!(export(&session, dir.path(), "all").unwrap().is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn comma_separated_formats() {
        let formats = Formats::parse("text, html").unwrap();
        assert!(formats.text && formats.html && !formats.json);
        assert!(Formats::parse("none").unwrap().is_none());
        assert!(!Formats::parse("json,all").unwrap().is_none());
    }

    #[test]
    fn unknown_format_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = export(&answered_session(), dir.path(), "pdf").unwrap_err();
        assert!(err.to_string().contains("unknown output format"));
    }
}
