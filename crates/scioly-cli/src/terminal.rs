//! Line-oriented terminal frontend.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use scioly_core::model::AnswerOutcome;
use scioly_core::runner::{QuestionPrompt, QuizFrontend};

/// Reads answers from `input` and writes questions to `output`.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read one line without its line ending. `None` at end of input.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Print `label` and read the trimmed reply.
    pub fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        Ok(self.read_line()?.map(|s| s.trim().to_string()))
    }

    /// Like [`prompt`](Self::prompt), but an empty reply becomes `default`.
    pub fn prompt_or(&mut self, label: &str, default: &str) -> Result<Option<String>> {
        Ok(self
            .prompt(&format!("{label} [{default}]: "))?
            .map(|s| if s.is_empty() { default.to_string() } else { s }))
    }

    pub fn say(&mut self, text: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", text.as_ref())?;
        Ok(())
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }
}

/// Turn a typed reply into a choice for a question with `options`.
///
/// A reply that is exactly one of the options is taken as that option, so
/// numeric option labels still work. Otherwise a number picks the n-th
/// option. Anything else is submitted as typed.
pub fn resolve_choice(reply: &str, options: &[String]) -> String {
    if options.iter().any(|o| o == reply) {
        return reply.to_string();
    }
    match reply.parse::<usize>() {
        Ok(n) if (1..=options.len()).contains(&n) => options[n - 1].clone(),
        _ => reply.to_string(),
    }
}

impl<R: BufRead, W: Write> QuizFrontend for Terminal<R, W> {
    fn present(&mut self, prompt: &QuestionPrompt<'_>) -> Result<Option<String>> {
        let question = prompt.question;

        let timer = match prompt.remaining {
            Some(left) => format!(" ({}s left)", left.num_seconds()),
            None => String::new(),
        };
        writeln!(self.output)?;
        writeln!(
            self.output,
            "Q{}/{}{timer}: {}",
            prompt.key.index, prompt.total, question.text
        )?;
        for (i, option) in question.options.iter().enumerate() {
            writeln!(self.output, "  {}) {option}", i + 1)?;
        }

        loop {
            let Some(reply) = self.prompt("Answer (? for hint, q to quit): ")? else {
                return Ok(None);
            };
            match reply.as_str() {
                "" => continue,
                "q" | "quit" => return Ok(None),
                "?" => {
                    match &question.hint {
                        Some(hint) => writeln!(self.output, "Hint: {hint}")?,
                        None => writeln!(self.output, "No hint for this question.")?,
                    }
                    continue;
                }
                _ => return Ok(Some(resolve_choice(&reply, &question.options))),
            }
        }
    }

    fn on_answer(&mut self, outcome: &AnswerOutcome) {
        let line = if outcome.correct {
            "Correct!".to_string()
        } else {
            format!("Incorrect! Correct answer: {}", outcome.expected)
        };
        if let Err(e) = writeln!(self.output, "{line}") {
            tracing::warn!("failed to write answer feedback: {e}");
        }
    }

    fn on_time_up(&mut self, presented: usize, total: usize) {
        if let Err(e) = writeln!(
            self.output,
            "\nTime's up! {presented} of {total} questions shown."
        ) {
            tracing::warn!("failed to write time-up notice: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scioly_core::model::{Mode, Question, QuestionKey};
    use std::io::Cursor;

    fn options() -> Vec<String> {
        ["2", "3", "4", "5"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_option_text_wins_over_index() {
        assert_eq!(resolve_choice("3", &options()), "3");
        assert_eq!(resolve_choice("1", &options()), "2");
    }

    #[test]
    fn number_picks_option() {
        let opts: Vec<String> = vec!["Sirius".into(), "Vega".into()];
        assert_eq!(resolve_choice("2", &opts), "Vega");
        assert_eq!(resolve_choice("3", &opts), "3");
        assert_eq!(resolve_choice("0", &opts), "0");
        assert_eq!(resolve_choice("Rigel", &opts), "Rigel");
    }

    #[test]
    fn free_answer_passes_through() {
        assert_eq!(resolve_choice("42", &[]), "42");
    }

    fn present(input: &str, question: &Question) -> (Option<String>, String) {
        let mut out = Vec::new();
        let answer = {
            let mut terminal = Terminal::new(Cursor::new(input.to_string()), &mut out);
            let prompt = QuestionPrompt {
                key: QuestionKey::new(Mode::Study, 1),
                question,
                total: 2,
                remaining: None,
            };
            terminal.present(&prompt).unwrap()
        };
        (answer, String::from_utf8(out).unwrap())
    }

    #[test]
    fn present_shows_options_and_hint() {
        let q = Question::new("Brightest star?", "Sirius")
            .with_options(["Sirius", "Vega"])
            .with_hint("Dog star");
        let (answer, out) = present("?\n\n1\n", &q);

        assert_eq!(answer.as_deref(), Some("Sirius"));
        assert!(out.contains("Q1/2: Brightest star?"));
        assert!(out.contains("  2) Vega"));
        assert!(out.contains("Hint: Dog star"));
    }

    #[test]
    fn present_quit_and_eof() {
        let q = Question::new("Q", "A");
        assert_eq!(present("q\n", &q).0, None);
        assert_eq!(present("", &q).0, None);
    }

    #[test]
    fn present_trims_reply() {
        let q = Question::new("Unit of resistance?", "Ohm");
        assert_eq!(present("  Ohm \r\n", &q).0.as_deref(), Some("Ohm"));
    }
}
