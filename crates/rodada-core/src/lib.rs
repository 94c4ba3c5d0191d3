//! # rodada-core: Pure Business Logic for Rodada
//!
//! This crate is the **heart** of Rodada, the record keeper for a bicycle
//! rental shop. It owns the in-memory records and every rule about loans.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Rodada Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    rodada CLI (apps/cli)                        │   │
//! │  │    subcommands ──► interactive shell ──► reports ──► export     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ rodada-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌──────────────┐ ┌──────────┐  │   │
//! │  │   │   store   │  │   keys    │  │ availability │ │  engine  │  │   │
//! │  │   │   Unit    │  │ next_key  │  │ available_   │ │  create_ │  │   │
//! │  │   │ Customer  │  │           │  │   units      │ │  loan    │  │   │
//! │  │   │   Loan    │  │           │  │              │ │  record_ │  │   │
//! │  │   └───────────┘  └───────────┘  └──────────────┘ │  return  │  │   │
//! │  │                                                  └──────────┘  │   │
//! │  │   NO I/O • NO FILES • NO TERMINAL • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 rodada-db (CSV tables, xlsx export)              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Unit, Customer, Loan, WheelSize)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//! - [`keys`] - Identifier generator
//! - [`store`] - Entity store, the sole owner of record state
//! - [`availability`] - Which units are not on loan
//! - [`engine`] - Loan lifecycle: checkout and return
//! - [`clock`] - Source of "today"
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use rodada_core::{EntityStore, FixedClock, LoanEngine, LoanRequest};
//!
//! let mut store = EntityStore::new();
//! let unit = store.add_unit(26).unwrap();
//! let customer = store.add_customer("Garza Lopez", "Ana", "8112345678").unwrap();
//!
//! let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//! let engine = LoanEngine::new(FixedClock::new(today));
//!
//! let loan = engine
//!     .create_loan(&mut store, LoanRequest::new(customer.key, unit.key, 5))
//!     .unwrap();
//! assert_eq!(loan.due_date, NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
//! assert!(rodada_core::available_units(&store).is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod availability;
pub mod clock;
pub mod engine;
pub mod error;
pub mod keys;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use availability::{available_units, is_available};
pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{LoanEngine, LoanRequest};
pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use keys::{next_key, Keyed};
pub use store::EntityStore;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Text format of every date the shop reads or writes (`mm-dd-yyyy`).
pub const DATE_FORMAT: &str = "%m-%d-%Y";

/// Longest customer name kept; longer input is truncated.
pub const MAX_NAME_LEN: usize = 40;

/// Exact number of digits in a phone number.
pub const PHONE_DIGITS: usize = 10;

/// Shortest loan, in days.
pub const MIN_LOAN_DAYS: i64 = 1;

/// Longest loan, in days.
///
/// ## Business Reason
/// Two weeks is the longest period a bicycle leaves the shop.
pub const MAX_LOAN_DAYS: i64 = 14;
