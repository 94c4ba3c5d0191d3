//! # Domain Types
//!
//! Core domain types used throughout Rodada.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │      Unit       │   │    Customer     │   │        Loan         │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  key            │◄─┐│  key            │◄─┐│  folio              │   │
//! │  │  wheel_size     │  ││  last_name      │  ││  unit_key (FK)      │   │
//! │  └─────────────────┘  ││  first_name     │  └┤  customer_key (FK)  │   │
//! │                       ││  phone          │   │  loan_date          │   │
//! │  ┌─────────────────┐  │└─────────────────┘   │  loan_days          │   │
//! │  │   WheelSize     │  └──────────────────────┤  due_date           │   │
//! │  │  R20, R26, R29  │                         │  actual_return_date │   │
//! │  └─────────────────┘                         └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Units and customers never change after registration. A loan changes
//! exactly once, when its return is recorded.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::keys::Keyed;

/// Primary key of a unit or customer.
pub type Key = u32;

/// Primary key of a loan.
pub type Folio = u32;

// =============================================================================
// Wheel Size
// =============================================================================

/// Wheel size ("rodada") of a bicycle, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum WheelSize {
    R20,
    R26,
    R29,
}

impl WheelSize {
    /// Every size the shop stocks, smallest first.
    pub const ALL: [WheelSize; 3] = [WheelSize::R20, WheelSize::R26, WheelSize::R29];

    /// Returns the size in inches.
    #[inline]
    pub const fn inches(self) -> u8 {
        match self {
            WheelSize::R20 => 20,
            WheelSize::R26 => 26,
            WheelSize::R29 => 29,
        }
    }
}

impl TryFrom<i64> for WheelSize {
    type Error = ValidationError;

    fn try_from(inches: i64) -> Result<Self, Self::Error> {
        WheelSize::ALL
            .into_iter()
            .find(|size| i64::from(size.inches()) == inches)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "wheel size".to_string(),
                allowed: WheelSize::ALL
                    .iter()
                    .map(|size| size.inches().to_string())
                    .collect(),
            })
    }
}

impl From<WheelSize> for i64 {
    fn from(size: WheelSize) -> Self {
        i64::from(size.inches())
    }
}

impl fmt::Display for WheelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inches())
    }
}

// =============================================================================
// Unit
// =============================================================================

/// A bicycle in the rental inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Unique key, assigned on registration.
    pub key: Key,

    /// Wheel size.
    pub wheel_size: WheelSize,
}

impl Keyed for Unit {
    fn key(&self) -> u32 {
        self.key
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A registered customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique key, assigned on registration.
    pub key: Key,

    /// Last names (up to 40 letters and spaces).
    pub last_name: String,

    /// First names (up to 40 letters and spaces).
    pub first_name: String,

    /// Ten-digit phone number.
    pub phone: String,
}

impl Customer {
    /// Returns "first last" for display.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Keyed for Customer {
    fn key(&self) -> u32 {
        self.key
    }
}

// =============================================================================
// Loan Status
// =============================================================================

/// Lifecycle state of a loan.
///
/// ```text
///   create_loan            record_return
///  ────────────►  Open  ─────────────────►  Returned (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    /// The bicycle is out.
    Open,
    /// The bicycle came back.
    Returned,
}

// =============================================================================
// Loan
// =============================================================================

/// A checkout of one unit by one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    /// Unique transaction number.
    pub folio: Folio,

    /// Unit lent (FK).
    pub unit_key: Key,

    /// Customer who took it (FK).
    pub customer_key: Key,

    /// Day the unit left the shop.
    pub loan_date: NaiveDate,

    /// Length of the loan (1-14).
    pub loan_days: u32,

    /// `loan_date + loan_days`.
    pub due_date: NaiveDate,

    /// Day the unit actually came back; `None` while the loan is open.
    pub actual_return_date: Option<NaiveDate>,
}

impl Loan {
    /// Current lifecycle state.
    #[inline]
    pub fn status(&self) -> LoanStatus {
        match self.actual_return_date {
            None => LoanStatus::Open,
            Some(_) => LoanStatus::Returned,
        }
    }

    /// True while the unit has not been returned.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.actual_return_date.is_none()
    }
}

impl Keyed for Loan {
    fn key(&self) -> u32 {
        self.folio
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn loan(returned: Option<NaiveDate>) -> Loan {
        let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        Loan {
            folio: 1,
            unit_key: 1,
            customer_key: 1,
            loan_date: day,
            loan_days: 5,
            due_date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            actual_return_date: returned,
        }
    }

    #[test]
    fn test_wheel_size_from_inches() {
        assert_eq!(WheelSize::try_from(20).unwrap(), WheelSize::R20);
        assert_eq!(WheelSize::try_from(26).unwrap(), WheelSize::R26);
        assert_eq!(WheelSize::try_from(29).unwrap(), WheelSize::R29);
        assert!(WheelSize::try_from(24).is_err());
        assert!(WheelSize::try_from(-26).is_err());
    }

    #[test]
    fn test_wheel_size_serializes_as_inches() {
        let json = serde_json::to_string(&WheelSize::R29).unwrap();
        assert_eq!(json, "29");

        let size: WheelSize = serde_json::from_str("20").unwrap();
        assert_eq!(size, WheelSize::R20);
        assert!(serde_json::from_str::<WheelSize>("21").is_err());
    }

    #[test]
    fn test_loan_status() {
        let open = loan(None);
        assert!(open.is_open());
        assert_eq!(open.status(), LoanStatus::Open);

        let closed = loan(NaiveDate::from_ymd_opt(2025, 1, 6));
        assert!(!closed.is_open());
        assert_eq!(closed.status(), LoanStatus::Returned);
    }

    #[test]
    fn test_customer_full_name() {
        let customer = Customer {
            key: 1,
            last_name: "Núñez Peña".to_string(),
            first_name: "José".to_string(),
            phone: "8112345678".to_string(),
        };
        assert_eq!(customer.full_name(), "José Núñez Peña");
    }
}
