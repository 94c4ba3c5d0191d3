//! # Validation Module
//!
//! Input validation rules for Rodada.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI (clap / shell prompts)                                   │
//! │  ├── Type parsing (keys are integers)                                  │
//! │  └── Re-prompt loop until the core accepts the value                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Wheel sizes, names, phones                                        │
//! │  └── Loan dates, loan days, return dates                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: EntityStore / LoanEngine                                     │
//! │  └── Foreign keys, availability, open-loan lookups                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validators return the normalized value on success, so callers never
//! store raw input.

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::types::WheelSize;
use crate::{DATE_FORMAT, MAX_LOAN_DAYS, MAX_NAME_LEN, MIN_LOAN_DAYS, PHONE_DIGITS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Accented letters accepted in names, besides ASCII letters.
const ACCENTED_LETTERS: &str = "áéíóúÁÉÍÓÚñÑüÜ";

// =============================================================================
// Unit Validators
// =============================================================================

/// Validates a wheel size given in inches.
///
/// ## Example
/// ```rust
/// use rodada_core::validation::validate_wheel_size;
/// use rodada_core::WheelSize;
///
/// assert_eq!(validate_wheel_size(26).unwrap(), WheelSize::R26);
/// assert!(validate_wheel_size(27).is_err());
/// ```
pub fn validate_wheel_size(inches: i64) -> ValidationResult<WheelSize> {
    WheelSize::try_from(inches)
}

// =============================================================================
// Customer Validators
// =============================================================================

/// Normalizes a last or first name.
///
/// ## Rules
/// - Surrounding whitespace is dropped
/// - Anything past 40 characters is cut off
/// - Must not be empty
/// - Only letters (including `áéíóúñü`) and spaces
///
/// ## Example
/// ```rust
/// use rodada_core::validation::normalize_name;
///
/// assert_eq!(normalize_name("last name", "  Peña ").unwrap(), "Peña");
/// assert!(normalize_name("last name", "R2-D2").is_err());
/// ```
pub fn normalize_name(field: &str, input: &str) -> ValidationResult<String> {
    let truncated: String = input.trim().chars().take(MAX_NAME_LEN).collect();
    let name = truncated.trim_end();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if !name.chars().all(is_name_char) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "only letters and spaces are allowed".to_string(),
        });
    }

    Ok(name.to_string())
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == ' ' || ACCENTED_LETTERS.contains(c)
}

/// Validates a phone number: exactly ten digits, nothing else.
pub fn validate_phone(input: &str) -> ValidationResult<String> {
    let phone = input.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    if phone.chars().count() != PHONE_DIGITS || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: format!("must be exactly {PHONE_DIGITS} digits"),
        });
    }

    Ok(phone.to_string())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Parses a `mm-dd-yyyy` date.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).ok()
}

/// Formats a date as `mm-dd-yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Treats a blank answer the same as no answer.
fn supplied(input: Option<&str>) -> Option<&str> {
    input.map(str::trim).filter(|s| !s.is_empty())
}

/// Resolves the loan date.
///
/// ## Rules
/// - Omitted or blank means `today`
/// - Otherwise must parse as `mm-dd-yyyy` and not lie before `today`
pub fn resolve_loan_date(input: Option<&str>, today: NaiveDate) -> ValidationResult<NaiveDate> {
    let Some(text) = supplied(input) else {
        return Ok(today);
    };

    match parse_date(text) {
        Some(date) if date >= today => Ok(date),
        _ => Err(ValidationError::InvalidLoanDate {
            input: text.to_string(),
        }),
    }
}

/// Resolves the actual return date of a loan due on `due`.
///
/// ## Rules
/// - Omitted or blank means `today`
/// - Must parse as `mm-dd-yyyy`
/// - Must not lie before `due`, whether typed or defaulted
pub fn resolve_return_date(
    input: Option<&str>,
    today: NaiveDate,
    due: NaiveDate,
) -> ValidationResult<NaiveDate> {
    let returned = match supplied(input) {
        None => today,
        Some(text) => parse_date(text).ok_or_else(|| ValidationError::InvalidReturnDate {
            input: text.to_string(),
        })?,
    };

    if returned < due {
        return Err(ValidationError::ReturnBeforeDue { returned, due });
    }

    Ok(returned)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates the length of a loan.
///
/// ## Rules
/// - Between 1 and 14 days, inclusive
pub fn validate_loan_days(days: i64) -> ValidationResult<u32> {
    if !(MIN_LOAN_DAYS..=MAX_LOAN_DAYS).contains(&days) {
        return Err(loan_days_error(days.to_string()));
    }

    u32::try_from(days).map_err(|_| loan_days_error(days.to_string()))
}

/// Parses typed loan days, reporting non-integers as out of range.
///
/// Only the number is read here; [`validate_loan_days`] checks the range.
pub fn parse_loan_days(input: &str) -> ValidationResult<i64> {
    let text = input.trim();
    text.parse().map_err(|_| loan_days_error(text.to_string()))
}

fn loan_days_error(input: String) -> ValidationError {
    ValidationError::LoanDaysOutOfRange {
        input,
        min: MIN_LOAN_DAYS,
        max: MAX_LOAN_DAYS,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
