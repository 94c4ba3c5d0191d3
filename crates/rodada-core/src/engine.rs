//! # Loan Lifecycle Engine
//!
//! Checkout and return of bicycles.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    create_loan(request)                                 │
//! │                                                                         │
//! │  1. customer exists?          ── no ──► CustomerNotFound   (Reference)  │
//! │       │                                                                 │
//! │  2. unit in available_units?  ── no ──► UnitNotAvailable   (Reference)  │
//! │       │                                                                 │
//! │  3. loan date parses, >= today? ─ no ─► InvalidLoanDate    (Validation) │
//! │       │                                                                 │
//! │  4. 1 <= days <= 14?          ── no ──► LoanDaysOutOfRange (Validation) │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  EntityStore::add_loan ──► Loan { folio, due_date, open }               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Return Flow
//! ```text
//!   folio names an open loan? ── no ──► OpenLoanNotFound (NotFound)
//!        │
//!   return date parses, >= due date? ── no ──► ReturnBeforeDue (Validation)
//!        │
//!        ▼
//!   EntityStore::update_loan_return ──► Loan { returned }
//! ```
//!
//! Every check runs before the store is touched, so a failed call leaves the
//! store (and its key sequences) unchanged. The engine never retries; asking
//! again is the caller's job.

use crate::availability;
use crate::clock::{Clock, SystemClock};
use crate::error::{CoreError, CoreResult};
use crate::store::EntityStore;
use crate::types::{Folio, Key, Loan};
use crate::validation;

// =============================================================================
// Loan Request
// =============================================================================

/// Everything the operator supplies for a checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanRequest {
    pub customer_key: Key,
    pub unit_key: Key,
    /// `mm-dd-yyyy`; `None` or blank means today.
    pub loan_date: Option<String>,
    pub loan_days: i64,
}

impl LoanRequest {
    /// A loan starting today.
    pub fn new(customer_key: Key, unit_key: Key, loan_days: i64) -> Self {
        LoanRequest {
            customer_key,
            unit_key,
            loan_date: None,
            loan_days,
        }
    }

    /// Sets an explicit loan date.
    pub fn on(mut self, loan_date: impl Into<String>) -> Self {
        self.loan_date = Some(loan_date.into());
        self
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Enforces the loan rules on top of an [`EntityStore`].
#[derive(Debug, Clone, Default)]
pub struct LoanEngine<C = SystemClock> {
    clock: C,
}

impl<C: Clock> LoanEngine<C> {
    pub fn new(clock: C) -> Self {
        LoanEngine { clock }
    }

    /// Creates an open loan after checking the request in order.
    pub fn create_loan(&self, store: &mut EntityStore, request: LoanRequest) -> CoreResult<Loan> {
        if store.find_customer(request.customer_key).is_none() {
            return Err(CoreError::CustomerNotFound(request.customer_key));
        }

        if !availability::is_available(store, request.unit_key) {
            return Err(CoreError::UnitNotAvailable(request.unit_key));
        }

        let loan_date =
            validation::resolve_loan_date(request.loan_date.as_deref(), self.clock.today())?;
        let loan_days = validation::validate_loan_days(request.loan_days)?;

        store.add_loan(request.unit_key, request.customer_key, loan_date, loan_days)
    }

    /// Records the return of loan `folio`, closing it.
    pub fn record_return(
        &self,
        store: &mut EntityStore,
        folio: Folio,
        actual_return_date: Option<&str>,
    ) -> CoreResult<Loan> {
        let due_date = store
            .find_loan(folio)
            .filter(|loan| loan.is_open())
            .map(|loan| loan.due_date)
            .ok_or(CoreError::OpenLoanNotFound(folio))?;

        let returned =
            validation::resolve_return_date(actual_return_date, self.clock.today(), due_date)?;

        store.update_loan_return(folio, returned).cloned()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::{ErrorKind, ValidationError};
    use crate::types::LoanStatus;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn engine_on(today: NaiveDate) -> LoanEngine<FixedClock> {
        LoanEngine::new(FixedClock::new(today))
    }

    fn shop() -> EntityStore {
        let mut store = EntityStore::new();
        store.add_unit(26).unwrap();
        store.add_unit(29).unwrap();
        store.add_customer("Garza Lopez", "Ana", "8112345678").unwrap();
        store
    }

    #[test]
    fn test_checkout_and_return_scenario() {
        let mut store = shop();
        let engine = engine_on(date(2025, 1, 1));

        let loan = engine
            .create_loan(&mut store, LoanRequest::new(1, 1, 5).on("01-01-2025"))
            .unwrap();
        assert_eq!(loan.folio, 1);
        assert_eq!(loan.due_date, date(2025, 1, 6));
        assert_eq!(loan.actual_return_date, None);
        assert!(!availability::is_available(&store, 1));

        let returned = engine
            .record_return(&mut store, 1, Some("01-06-2025"))
            .unwrap();
        assert_eq!(returned.status(), LoanStatus::Returned);
        assert_eq!(returned.actual_return_date, Some(date(2025, 1, 6)));
        assert_eq!(store.closed_loans().len(), 1);
        assert!(availability::is_available(&store, 1));
    }

    #[test]
    fn test_loan_date_defaults_to_today() {
        let mut store = shop();
        let engine = engine_on(date(2025, 5, 20));

        let loan = engine
            .create_loan(&mut store, LoanRequest::new(1, 2, 14))
            .unwrap();
        assert_eq!(loan.loan_date, date(2025, 5, 20));
        assert_eq!(loan.due_date, date(2025, 6, 3));
    }

    #[test]
    fn test_unknown_customer_is_reported_first() {
        let mut store = shop();
        let engine = engine_on(date(2025, 1, 1));

        // Unit and days are also bad; the customer check still wins.
        let err = engine
            .create_loan(&mut store, LoanRequest::new(9, 9, 99))
            .unwrap_err();
        assert_eq!(err, CoreError::CustomerNotFound(9));
        assert_eq!(err.kind(), ErrorKind::Reference);
    }

    #[test]
    fn test_unit_on_open_loan_is_rejected() {
        let mut store = shop();
        let engine = engine_on(date(2025, 1, 1));
        engine
            .create_loan(&mut store, LoanRequest::new(1, 1, 3))
            .unwrap();

        let err = engine
            .create_loan(&mut store, LoanRequest::new(1, 1, 3))
            .unwrap_err();
        assert_eq!(err, CoreError::UnitNotAvailable(1));
        assert_eq!(err.kind(), ErrorKind::Reference);

        let err = engine
            .create_loan(&mut store, LoanRequest::new(1, 7, 3))
            .unwrap_err();
        assert_eq!(err, CoreError::UnitNotAvailable(7));
        assert_eq!(store.loans().len(), 1);
    }

    #[test]
    fn test_past_or_malformed_loan_date_is_rejected() {
        let mut store = shop();
        let engine = engine_on(date(2025, 3, 10));

        for input in ["03-09-2025", "2025-03-10", "13-01-2025", "mañana"] {
            let err = engine
                .create_loan(&mut store, LoanRequest::new(1, 1, 3).on(input))
                .unwrap_err();
            assert!(matches!(
                err,
                CoreError::Validation(ValidationError::InvalidLoanDate { .. })
            ));
        }
        assert!(store.loans().is_empty());
    }

    #[test]
    fn test_out_of_range_days_leave_store_unchanged() {
        let mut store = shop();
        let engine = engine_on(date(2025, 1, 1));

        let err = engine
            .create_loan(&mut store, LoanRequest::new(1, 1, 15))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(store.loans().is_empty());

        assert!(engine
            .create_loan(&mut store, LoanRequest::new(1, 1, 0))
            .is_err());

        // No folio was consumed by the failures.
        let loan = engine
            .create_loan(&mut store, LoanRequest::new(1, 1, 1))
            .unwrap();
        assert_eq!(loan.folio, 1);
    }

    #[test]
    fn test_folios_increase() {
        let mut store = shop();
        let engine = engine_on(date(2025, 1, 1));

        let first = engine
            .create_loan(&mut store, LoanRequest::new(1, 1, 2))
            .unwrap();
        let second = engine
            .create_loan(&mut store, LoanRequest::new(1, 2, 2))
            .unwrap();
        engine.record_return(&mut store, 1, Some("01-03-2025")).unwrap();
        let third = engine
            .create_loan(&mut store, LoanRequest::new(1, 1, 2))
            .unwrap();

        assert!(first.folio < second.folio && second.folio < third.folio);
        assert_eq!(third.folio, 3);
    }

    #[test]
    fn test_return_before_due_date_is_rejected() {
        let mut store = shop();
        let engine = engine_on(date(2025, 1, 1));
        engine
            .create_loan(&mut store, LoanRequest::new(1, 1, 5))
            .unwrap();

        let err = engine
            .record_return(&mut store, 1, Some("01-05-2025"))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::ReturnBeforeDue { .. })
        ));

        // Defaulting to today (01-01) is also before the due date.
        assert!(engine.record_return(&mut store, 1, None).is_err());
        assert!(store.find_loan(1).unwrap().is_open());
    }

    #[test]
    fn test_return_defaults_to_today() {
        let mut store = shop();
        engine_on(date(2025, 1, 1))
            .create_loan(&mut store, LoanRequest::new(1, 1, 2))
            .unwrap();

        let loan = engine_on(date(2025, 1, 8))
            .record_return(&mut store, 1, None)
            .unwrap();
        assert_eq!(loan.actual_return_date, Some(date(2025, 1, 8)));
    }

    #[test]
    fn test_return_of_unknown_or_closed_folio() {
        let mut store = shop();
        let engine = engine_on(date(2025, 1, 1));

        let err = engine.record_return(&mut store, 1, None).unwrap_err();
        assert_eq!(err, CoreError::OpenLoanNotFound(1));
        assert_eq!(err.kind(), ErrorKind::NotFound);

        engine
            .create_loan(&mut store, LoanRequest::new(1, 1, 1))
            .unwrap();
        engine.record_return(&mut store, 1, Some("01-02-2025")).unwrap();

        let err = engine
            .record_return(&mut store, 1, Some("01-09-2025"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(
            store.find_loan(1).unwrap().actual_return_date,
            Some(date(2025, 1, 2))
        );
    }
}
