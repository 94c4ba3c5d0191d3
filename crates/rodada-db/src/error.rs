//! # Persistence Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / csv::Error / XlsxError                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds the file path and row                    │
//! │       │                                                                 │
//! │       ├── on load: logged, table starts empty and is marked unreadable │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CliError (in app) ← on save/export, shown to the operator             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

/// File operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Opening, writing or renaming a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader or writer failed (bad quoting, wrong column count...).
    #[error("CSV error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A row parsed as CSV but holds a value the domain rejects.
    ///
    /// ## When This Occurs
    /// - `Rodada` other than 20, 26 or 29
    /// - A date not in `mm-dd-yyyy`
    #[error("invalid record in {} line {line}: {reason}", path.display())]
    InvalidRecord {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// Saving would replace a table that failed to load.
    ///
    /// The file still holds the only copy of its records, so it is left alone
    /// until the operator repairs or moves it.
    #[error("{} could not be read when loading; not overwriting it", path.display())]
    UnreadableTable { path: PathBuf },

    /// Building or saving the spreadsheet failed.
    #[error("spreadsheet export failed: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
}

impl DbError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        DbError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn csv(path: &Path, source: csv::Error) -> Self {
        DbError::Csv {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn invalid_record(path: &Path, line: usize, reason: impl Into<String>) -> Self {
        DbError::InvalidRecord {
            path: path.to_path_buf(),
            line,
            reason: reason.into(),
        }
    }
}

/// Result type for persistence operations.
pub type DbResult<T> = Result<T, DbError>;
