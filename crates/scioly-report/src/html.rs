//! HTML cheat sheet generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use scioly_core::report::{file_stem, CheatSheet, NOTHING_ANSWERED};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML page from a cheat sheet.
pub fn generate_html(sheet: &CheatSheet, generated_at: DateTime<Utc>) -> String {
    let event = html_escape(sheet.event());
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{event} cheat sheet</title>\n"));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{event} Cheat Sheet</h1>\n"));
    html.push_str(&format!(
        "<p class=\"meta\">{} answered | {}</p>\n",
        sheet.lines().len(),
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    html.push_str("<section class=\"sheet\">\n");
    if sheet.is_empty() {
        html.push_str(&format!(
            "<p class=\"warning\">{}</p>\n",
            html_escape(NOTHING_ANSWERED)
        ));
    } else {
        html.push_str(
            "<input type=\"search\" id=\"search\" placeholder=\"Filter...\" oninput=\"filterLines()\">\n",
        );
        html.push_str("<ol id=\"lines\">\n");
        for line in sheet.lines() {
            html.push_str(&format!("<li>{}</li>\n", html_escape(line)));
        }
        html.push_str("</ol>\n");
    }
    html.push_str("</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write `<event>_cheatsheet.html` into `dir`.
///
/// Returns `None` without writing anything if nothing has been answered.
pub fn write_html_cheat_sheet(sheet: &CheatSheet, dir: &Path) -> Result<Option<PathBuf>> {
    if sheet.is_empty() {
        return Ok(None);
    }
    let html = generate_html(sheet, Utc::now());
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}_cheatsheet.html", file_stem(sheet.event())));
    std::fs::write(&path, html)
        .with_context(|| format!("failed to write HTML cheat sheet to {}", path.display()))?;
    Ok(Some(path))
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --warn: #fef3c7; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --warn: #78350f; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1 { margin-top: 1rem; }
.meta { color: #6b7280; }
.warning { background: var(--warn); padding: 1rem; border-radius: 8px; }
input[type=search] { padding: 0.5rem; width: 100%; max-width: 30rem; border: 1px solid var(--border); border-radius: 6px; }
ol { line-height: 1.8; }
li { border-bottom: 1px solid var(--border); }
@media print { input[type=search] { display: none; } }
"#;

const JS: &str = r#"
function filterLines() {
  const search = document.getElementById('search');
  if (!search) return;
  const needle = search.value.toLowerCase();
  document.querySelectorAll('#lines li').forEach(li => {
    li.style.display = li.textContent.toLowerCase().includes(needle) ? '' : 'none';
  });
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn make_sheet() -> CheatSheet {
        CheatSheet::from_log(
            "Circuit Lab",
            &[
                "Q1: Ohm's Law formula is? - Answer: V=IR".to_string(),
                "Q2: Resistors in series have which total resistance? - Answer: Sum of resistances"
                    .to_string(),
            ],
        )
    }

    #[test]
    fn html_contains_required_elements() {
        let html = generate_html(&make_sheet(), Utc::now());

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("Circuit Lab Cheat Sheet"));
        assert!(html.contains("2 answered"));
        assert!(html.contains("Sum of resistances"));
        assert_eq!(html.matches("<li>").count(), 2);
    }

    #[test]
    fn html_escapes_user_text() {
        let sheet = CheatSheet::from_log(
            "<Astro>",
            &["Q1: Is 2 < 3 & 3 > 2? - Answer: \"yes\"".to_string()],
        );
        let html = generate_html(&sheet, Utc::now());

        assert!(html.contains("&lt;Astro&gt;"));
        assert!(html.contains("2 &lt; 3 &amp; 3 &gt; 2"));
        assert!(html.contains("&quot;yes&quot;"));
        assert!(!html.contains("<Astro>"));
    }

    #[test]
    fn html_for_empty_sheet_shows_notice() {
        let sheet = CheatSheet::from_log("Forensics", &[]);
        let html = generate_html(&sheet, Utc::now());
        assert!(html.contains("No questions answered yet!"));
        assert!(!html.contains("<ol"));
    }

    #[test]
    fn write_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_html_cheat_sheet(&make_sheet(), dir.path())
            .unwrap()
            .unwrap();

        assert_eq!(path, dir.path().join("Circuit Lab_cheatsheet.html"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }

    #[test]
    fn write_skips_empty_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let sheet = CheatSheet::from_log("Forensics", &[]);
        assert!(write_html_cheat_sheet(&sheet, dir.path()).unwrap().is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
