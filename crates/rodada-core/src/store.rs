//! # Entity Store
//!
//! In-memory collections of units, customers and loans.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         EntityStore                                     │
//! │                                                                         │
//! │   units: Vec<Unit>   customers: Vec<Customer>   loans: Vec<Loan>        │
//! │        ▲                    ▲                        ▲                  │
//! │        │ add_unit           │ add_customer           │ add_loan         │
//! │        │                    │                        │ update_loan_     │
//! │        │                    │                        │   return         │
//! │                                                                         │
//! │   The store is the only place records are mutated. Callers get          │
//! │   shared slices for reading and go through these methods to write.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store checks values and foreign keys. It does NOT check availability;
//! that rule lives in [`crate::engine::LoanEngine`].

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::keys::next_key;
use crate::types::{Customer, Folio, Key, Loan, Unit};
use crate::validation::{self, format_date};

/// Owns every record of the shop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityStore {
    units: Vec<Unit>,
    customers: Vec<Customer>,
    loans: Vec<Loan>,
}

impl EntityStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        EntityStore::default()
    }

    /// Rebuilds a store from previously persisted records, as-is.
    pub fn restore(units: Vec<Unit>, customers: Vec<Customer>, loans: Vec<Loan>) -> Self {
        EntityStore {
            units,
            customers,
            loans,
        }
    }

    // =========================================================================
    // Read Accessors
    // =========================================================================

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    pub fn find_unit(&self, key: Key) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.key == key)
    }

    pub fn find_customer(&self, key: Key) -> Option<&Customer> {
        self.customers.iter().find(|customer| customer.key == key)
    }

    pub fn find_loan(&self, folio: Folio) -> Option<&Loan> {
        self.loans.iter().find(|loan| loan.folio == folio)
    }

    /// Loans whose unit has not come back yet.
    pub fn open_loans(&self) -> Vec<&Loan> {
        self.loans.iter().filter(|loan| loan.is_open()).collect()
    }

    /// Loans with a recorded return.
    pub fn closed_loans(&self) -> Vec<&Loan> {
        self.loans.iter().filter(|loan| !loan.is_open()).collect()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Registers a bicycle with the given wheel size in inches.
    ///
    /// ## Returns
    /// * `Ok(Unit)` - The registered unit with its new key
    /// * `Err(CoreError::Validation)` - Size is not 20, 26 or 29
    pub fn add_unit(&mut self, wheel_size: i64) -> CoreResult<Unit> {
        let wheel_size = validation::validate_wheel_size(wheel_size)?;

        let unit = Unit {
            key: next_key(&self.units).ok_or(CoreError::KeysExhausted("units"))?,
            wheel_size,
        };
        self.units.push(unit.clone());

        Ok(unit)
    }

    /// Registers a customer.
    ///
    /// Names are trimmed and cut to 40 characters before being checked;
    /// every field is validated before anything is stored.
    pub fn add_customer(
        &mut self,
        last_name: &str,
        first_name: &str,
        phone: &str,
    ) -> CoreResult<Customer> {
        let last_name = validation::normalize_name("last name", last_name)?;
        let first_name = validation::normalize_name("first name", first_name)?;
        let phone = validation::validate_phone(phone)?;

        let customer = Customer {
            key: next_key(&self.customers).ok_or(CoreError::KeysExhausted("customers"))?,
            last_name,
            first_name,
            phone,
        };
        self.customers.push(customer.clone());

        Ok(customer)
    }

    /// Appends an open loan.
    ///
    /// ## Returns
    /// * `Ok(Loan)` - The new loan, due `loan_days` after `loan_date`
    /// * `Err(CoreError::CustomerNotFound)` - Dangling customer key
    /// * `Err(CoreError::UnitNotFound)` - Dangling unit key
    pub fn add_loan(
        &mut self,
        unit_key: Key,
        customer_key: Key,
        loan_date: NaiveDate,
        loan_days: u32,
    ) -> CoreResult<Loan> {
        if self.find_customer(customer_key).is_none() {
            return Err(CoreError::CustomerNotFound(customer_key));
        }
        if self.find_unit(unit_key).is_none() {
            return Err(CoreError::UnitNotFound(unit_key));
        }

        let due_date = loan_date
            .checked_add_days(Days::new(u64::from(loan_days)))
            .ok_or_else(|| ValidationError::InvalidLoanDate {
                input: format_date(loan_date),
            })?;

        let loan = Loan {
            folio: next_key(&self.loans).ok_or(CoreError::KeysExhausted("loans"))?,
            unit_key,
            customer_key,
            loan_date,
            loan_days,
            due_date,
            actual_return_date: None,
        };
        self.loans.push(loan.clone());

        Ok(loan)
    }

    /// Closes the open loan `folio` on `actual_return_date`.
    ///
    /// This is the only mutation a loan ever receives.
    pub fn update_loan_return(
        &mut self,
        folio: Folio,
        actual_return_date: NaiveDate,
    ) -> CoreResult<&Loan> {
        let loan = self
            .loans
            .iter_mut()
            .find(|loan| loan.folio == folio && loan.is_open())
            .ok_or(CoreError::OpenLoanNotFound(folio))?;

        loan.actual_return_date = Some(actual_return_date);
        Ok(&*loan)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
