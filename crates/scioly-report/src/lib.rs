//! scioly-report: HTML rendering of cheat sheets.

pub mod html;

pub use html::{generate_html, write_html_cheat_sheet};
