//! scioly-core: question bank, filtering, quiz session and drill timing.
//!
//! This crate defines the data model, the in-memory quiz session, and the
//! study/drill runners that the `scioly` binary drives through a frontend.

pub mod bank;
pub mod clock;
pub mod config;
pub mod error;
pub mod filter;
pub mod mock;
pub mod model;
pub mod report;
pub mod runner;
pub mod session;

pub use error::BankError;
pub use model::{AnswerOutcome, Mode, Question, QuestionKey, UNKNOWN};
pub use session::QuizSession;
