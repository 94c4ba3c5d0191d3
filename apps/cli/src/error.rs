//! # CLI Error Type
//!
//! Unified error type for commands and the shell.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Rodada                                 │
//! │                                                                         │
//! │  Command / menu handler                                                │
//! │  CliResult<T>                                                          │
//! │       │                                                                 │
//! │       ├── CoreError (Validation | Reference | NotFound | Capacity)     │
//! │       ├── DbError   (file, CSV, spreadsheet)                           │
//! │       └── prompt / JSON failures                                        │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  CliError ──► code() ──► exit status + "✗ message" on stderr           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! In the interactive shell a core error is printed and the menu comes back;
//! only one-shot commands turn it into an exit status.

use rodada_core::{CoreError, ErrorKind};
use rodada_db::DbError;
use thiserror::Error;

/// Errors surfaced to the operator.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("could not render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Machine-readable error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Input value rejected
    Validation,
    /// Dangling key or unit on loan
    Reference,
    /// No such open loan
    NotFound,
    /// Reading or writing files failed, or a table is full
    Storage,
    /// Anything else
    Internal,
}

impl ErrorCode {
    /// Process exit status for this category.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorCode::Internal => 1,
            ErrorCode::Validation => 2,
            ErrorCode::Reference => 3,
            ErrorCode::NotFound => 4,
            ErrorCode::Storage => 5,
        }
    }
}

impl CliError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CliError::Core(err) => match err.kind() {
                ErrorKind::Validation => ErrorCode::Validation,
                ErrorKind::Reference => ErrorCode::Reference,
                ErrorKind::NotFound => ErrorCode::NotFound,
                ErrorKind::Capacity => ErrorCode::Storage,
            },
            CliError::Db(_) => ErrorCode::Storage,
            CliError::Prompt(_) | CliError::Json(_) => ErrorCode::Internal,
        }
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
