//! Question bank error types.
//!
//! Loading a bank is the one place where the caller needs to tell failure
//! kinds apart: a missing file and a malformed file are reported differently,
//! and both halt startup.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading a question bank.
#[derive(Debug, Error)]
pub enum BankError {
    /// The bank file does not exist.
    #[error("question bank not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The bank file is not valid JSON, or a record has the wrong field types.
    #[error("malformed question bank {}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The top-level JSON value is neither an array nor an event-keyed object.
    #[error("malformed question bank {}: expected an array of questions or an object keyed by event, found {found}", path.display())]
    UnexpectedShape { path: PathBuf, found: &'static str },

    /// A record parsed but breaks a question invariant.
    #[error("malformed question bank {}: question {index}: {reason}", path.display())]
    InvalidQuestion {
        path: PathBuf,
        index: usize,
        reason: String,
    },

    /// Any other I/O failure while reading the bank.
    #[error("failed to read question bank {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BankError {
    /// Returns `true` if the bank file is missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, BankError::NotFound { .. })
    }

    /// Returns `true` if the bank file exists but its content is unusable.
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            BankError::Format { .. }
                | BankError::UnexpectedShape { .. }
                | BankError::InvalidQuestion { .. }
        )
    }
}
