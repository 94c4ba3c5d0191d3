//! # Availability Resolver
//!
//! A unit is available iff no open loan references it. Availability is never
//! stored; it is derived from the loan history on every call.
//!
//! ```text
//!   open_loans() ──► {unit_key, ...} ──► units whose key is NOT in the set
//! ```

use std::collections::HashSet;

use crate::store::EntityStore;
use crate::types::{Key, Unit};

/// Keys of the units currently out on loan.
fn units_on_loan(store: &EntityStore) -> HashSet<Key> {
    store
        .loans()
        .iter()
        .filter(|loan| loan.is_open())
        .map(|loan| loan.unit_key)
        .collect()
}

/// Returns every unit not on an open loan, in registration order.
pub fn available_units(store: &EntityStore) -> Vec<&Unit> {
    let on_loan = units_on_loan(store);

    store
        .units()
        .iter()
        .filter(|unit| !on_loan.contains(&unit.key))
        .collect()
}

/// True if `key` names a registered unit that is not on loan.
pub fn is_available(store: &EntityStore, key: Key) -> bool {
    store.find_unit(key).is_some() && !store.open_loans().iter().any(|loan| loan.unit_key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn keys(units: &[&Unit]) -> Vec<Key> {
        units.iter().map(|unit| unit.key).collect()
    }

    #[test]
    fn test_units_without_loans_are_available() {
        let mut store = EntityStore::new();
        store.add_unit(20).unwrap();
        store.add_unit(26).unwrap();

        assert_eq!(keys(&available_units(&store)), vec![1, 2]);
        assert!(is_available(&store, 1));
    }

    #[test]
    fn test_open_loan_hides_unit_until_returned() {
        let mut store = EntityStore::new();
        store.add_unit(20).unwrap();
        store.add_unit(26).unwrap();
        store.add_unit(29).unwrap();
        store.add_customer("Garza", "Ana", "8112345678").unwrap();

        store.add_loan(2, 1, date(2025, 1, 1), 3).unwrap();
        assert_eq!(keys(&available_units(&store)), vec![1, 3]);
        assert!(!is_available(&store, 2));

        store.update_loan_return(1, date(2025, 1, 4)).unwrap();
        assert_eq!(keys(&available_units(&store)), vec![1, 2, 3]);
        assert!(is_available(&store, 2));
    }

    #[test]
    fn test_history_of_returned_loans_does_not_block() {
        let mut store = EntityStore::new();
        store.add_unit(26).unwrap();
        store.add_customer("Garza", "Ana", "8112345678").unwrap();

        store.add_loan(1, 1, date(2025, 1, 1), 1).unwrap();
        store.update_loan_return(1, date(2025, 1, 2)).unwrap();
        store.add_loan(1, 1, date(2025, 1, 5), 1).unwrap();

        // The second, still open, loan is what counts.
        assert!(available_units(&store).is_empty());
    }

    #[test]
    fn test_unknown_unit_is_not_available() {
        let store = EntityStore::new();
        assert!(!is_available(&store, 1));
        assert!(available_units(&store).is_empty());
    }
}
