//! # Error Types
//!
//! Domain-specific error types for rodada-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rodada-core errors (this file)                                        │
//! │  ├── CoreError        - Loan lifecycle and store failures              │
//! │  │   ├── kind() = Validation  (bad input value)                        │
//! │  │   ├── kind() = Reference   (dangling key, unit on loan)             │
//! │  │   ├── kind() = NotFound    (no open loan with that folio)           │
//! │  │   └── kind() = Capacity    (a key sequence ran out)                 │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  rodada-db errors (separate crate)                                     │
//! │  └── DbError          - File and spreadsheet failures                  │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the operator sees (message + exit code)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every core error is recoverable: the operation did not run and the store
//! is exactly as it was before the call.

use chrono::NaiveDate;
use thiserror::Error;

use crate::types::{Folio, Key};
use crate::DATE_FORMAT;

// =============================================================================
// Error Kind
// =============================================================================

/// Coarse classification of a [`CoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or out-of-range input value.
    Validation,
    /// Dangling foreign key or a resource that cannot be used right now.
    Reference,
    /// Lookup miss on a primary key.
    NotFound,
    /// A key sequence has no values left.
    Capacity,
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// No customer has this key.
    #[error("customer not found: {0}")]
    CustomerNotFound(Key),

    /// No unit has this key.
    #[error("unit not found: {0}")]
    UnitNotFound(Key),

    /// The unit exists but is out on an open loan, or does not exist at all.
    ///
    /// ## When This Occurs
    /// - Checking out a bicycle that was never returned
    /// - Typing a unit key that is not in the available list
    #[error("unit not available: {0}")]
    UnitNotAvailable(Key),

    /// No loan with this folio is currently open.
    ///
    /// ## When This Occurs
    /// - The folio was never issued
    /// - The loan was already returned
    #[error("no open loan with folio {0}")]
    OpenLoanNotFound(Folio),

    /// The largest key of the table is already taken.
    #[error("no keys left for {0}")]
    KeysExhausted(&'static str),

    /// Validation error (wraps ValidationError).
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns the error category callers branch on.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Validation(_) => ErrorKind::Validation,
            CoreError::CustomerNotFound(_)
            | CoreError::UnitNotFound(_)
            | CoreError::UnitNotAvailable(_) => ErrorKind::Reference,
            CoreError::OpenLoanNotFound(_) => ErrorKind::NotFound,
            CoreError::KeysExhausted(_) => ErrorKind::Capacity,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when operator input doesn't meet requirements.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g., letters in a phone number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Loan date does not parse or lies in the past.
    #[error("invalid or past loan date: '{input}'")]
    InvalidLoanDate { input: String },

    /// Loan length is not an integer in the allowed range.
    #[error("loan days out of range: '{input}' (must be between {min} and {max})")]
    LoanDaysOutOfRange { input: String, min: i64, max: i64 },

    /// Return date does not parse as a calendar date.
    #[error("invalid return date: '{input}'")]
    InvalidReturnDate { input: String },

    /// Return date falls before the loan's due date.
    #[error(
        "return date precedes due date: {} < {}",
        .returned.format(DATE_FORMAT),
        .due.format(DATE_FORMAT)
    )]
    ReturnBeforeDue { returned: NaiveDate, due: NaiveDate },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CoreError::CustomerNotFound(7).to_string(),
            "customer not found: 7"
        );
        assert_eq!(
            CoreError::UnitNotAvailable(3).to_string(),
            "unit not available: 3"
        );
        assert_eq!(
            CoreError::OpenLoanNotFound(12).to_string(),
            "no open loan with folio 12"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "phone".to_string(),
        };
        assert_eq!(err.to_string(), "phone is required");

        let err = ValidationError::ReturnBeforeDue {
            returned: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            due: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "return date precedes due date: 01-05-2025 < 01-06-2025"
        );
    }

    #[test]
    fn test_error_kinds() {
        let validation: CoreError = ValidationError::InvalidLoanDate {
            input: "13-45-2025".to_string(),
        }
        .into();
        assert_eq!(validation.kind(), ErrorKind::Validation);
        assert_eq!(CoreError::CustomerNotFound(1).kind(), ErrorKind::Reference);
        assert_eq!(CoreError::UnitNotFound(1).kind(), ErrorKind::Reference);
        assert_eq!(CoreError::UnitNotAvailable(1).kind(), ErrorKind::Reference);
        assert_eq!(CoreError::OpenLoanNotFound(1).kind(), ErrorKind::NotFound);
        assert_eq!(CoreError::KeysExhausted("loans").kind(), ErrorKind::Capacity);
    }
}
