//! # Interactive Shell
//!
//! The operator's menu. Each entry is a handler over the open session.
//!
//! ```text
//! ┌──────────────────────────── Main menu ────────────────────────────┐
//! │  Register units ........ repeat while "register another?" is yes  │
//! │  Register customer ..... one customer, every field re-prompted    │
//! │  Register loans ........ one customer, units until key 0          │
//! │  Return a bicycle ...... shows active loans first                 │
//! │  Reports ............... units, customers, loans, returns, ...    │
//! │  Export data ........... CSV or Excel                             │
//! │  Quit .................. offers to save unsaved changes           │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field prompts validate with the same core rules the store enforces, so a
//! bad answer is reported and asked again instead of aborting the entry.
//! Core and storage errors from a handler are printed and the menu returns.

use dialoguer::{Confirm, Input, Select};
use rodada_core::validation::{
    format_date, normalize_name, parse_loan_days, resolve_loan_date, resolve_return_date,
    validate_loan_days, validate_phone, validate_wheel_size,
};
use rodada_core::{available_units, is_available, CoreError, Key, LoanRequest};

use crate::commands::report::{print_report, Report};
use crate::error::{CliError, CliResult};
use crate::output::{print_error, print_info, print_success, print_warning, OutputFormat};
use crate::session::Session;

/// What the menu loop does after a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

type Handler = fn(&mut Session) -> CliResult<Flow>;

struct MenuEntry {
    label: &'static str,
    handler: Handler,
}

const MENU: &[MenuEntry] = &[
    MenuEntry { label: "Register units", handler: register_units },
    MenuEntry { label: "Register customer", handler: register_customer },
    MenuEntry { label: "Register loans", handler: register_loans },
    MenuEntry { label: "Return a bicycle", handler: return_bicycle },
    MenuEntry { label: "Units report", handler: units_report },
    MenuEntry { label: "Available units report", handler: available_report },
    MenuEntry { label: "Customers report", handler: customers_report },
    MenuEntry { label: "Loans report", handler: loans_report },
    MenuEntry { label: "Active loans report", handler: active_report },
    MenuEntry { label: "Returns report", handler: returns_report },
    MenuEntry { label: "Export data", handler: export_data },
    MenuEntry { label: "Quit", handler: quit },
];

/// Runs the menu until the operator quits.
pub fn run(session: &mut Session) -> CliResult<()> {
    let labels: Vec<&str> = MENU.iter().map(|entry| entry.label).collect();

    loop {
        println!();
        let choice = Select::new()
            .with_prompt("Main menu")
            .items(&labels)
            .default(0)
            .interact()?;

        let Some(entry) = MENU.get(choice) else {
            continue;
        };

        match (entry.handler)(session) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => return Ok(()),
            Err(err @ CliError::Prompt(_)) => return Err(err),
            Err(err) => print_error(&err.to_string()),
        }
    }
}

// =============================================================================
// Prompt Helpers
// =============================================================================

/// Asks for a line until `accept` takes it.
fn prompt<T>(label: &str, mut accept: impl FnMut(&str) -> Result<T, String>) -> CliResult<T> {
    loop {
        let input: String = Input::new()
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()?;

        match accept(&input) {
            Ok(value) => return Ok(value),
            Err(reason) => print_error(&reason),
        }
    }
}

fn confirm(label: &str, default: bool) -> CliResult<bool> {
    Ok(Confirm::new()
        .with_prompt(label)
        .default(default)
        .interact()?)
}

fn parse_number(input: &str) -> Result<i64, String> {
    let text = input.trim();
    text.parse()
        .map_err(|_| format!("'{text}' is not a number"))
}

fn parse_key(input: &str) -> Result<Key, String> {
    let text = input.trim();
    text.parse()
        .map_err(|_| format!("'{text}' is not a valid key"))
}

// =============================================================================
// Registration
// =============================================================================

fn register_units(session: &mut Session) -> CliResult<Flow> {
    loop {
        let inches = prompt("Wheel size (20, 26, 29)", |input| {
            let inches = parse_number(input)?;
            validate_wheel_size(inches).map_err(|e| e.to_string())?;
            Ok(inches)
        })?;

        let unit = session.add_unit(inches)?;
        print_success(&format!("Registered unit {} ({})", unit.key, unit.wheel_size));

        if !confirm("Register another bicycle?", false)? {
            return Ok(Flow::Continue);
        }
    }
}

fn register_customer(session: &mut Session) -> CliResult<Flow> {
    let last_name = prompt("Last names (up to 40 characters)", |input| {
        normalize_name("last name", input).map_err(|e| e.to_string())
    })?;
    let first_name = prompt("First names (up to 40 characters)", |input| {
        normalize_name("first name", input).map_err(|e| e.to_string())
    })?;
    let phone = prompt("Phone (10 digits)", |input| {
        validate_phone(input).map_err(|e| e.to_string())
    })?;

    let customer = session.add_customer(&last_name, &first_name, &phone)?;
    print_success(&format!(
        "Registered customer {}: {}",
        customer.key,
        customer.full_name()
    ));
    Ok(Flow::Continue)
}

// =============================================================================
// Loans
// =============================================================================

fn register_loans(session: &mut Session) -> CliResult<Flow> {
    if available_units(session.store()).is_empty() {
        print_warning("No units available for loan.");
        return Ok(Flow::Continue);
    }

    let store = session.store();
    let customer_key = prompt("Customer key", |input| {
        let key = parse_key(input)?;
        match store.find_customer(key) {
            Some(_) => Ok(key),
            None => Err(CoreError::CustomerNotFound(key).to_string()),
        }
    })?;

    loop {
        if available_units(session.store()).is_empty() {
            print_info("No more units available.");
            return Ok(Flow::Continue);
        }

        println!("\nAvailable units:");
        print_report(session.store(), Report::Available, OutputFormat::Table)?;

        let store = session.store();
        let unit_key = prompt("Unit key to lend (0 to finish)", |input| {
            let key = parse_key(input)?;
            if key == 0 || is_available(store, key) {
                Ok(key)
            } else {
                Err(CoreError::UnitNotAvailable(key).to_string())
            }
        })?;

        if unit_key == 0 {
            print_info("Finished registering loans.");
            return Ok(Flow::Continue);
        }

        let today = session.today();
        let loan_date = prompt("Loan date (mm-dd-yyyy, blank for today)", |input| {
            resolve_loan_date(Some(input), today)
                .map(|_| input.trim().to_string())
                .map_err(|e| e.to_string())
        })?;
        let loan_days = prompt("Loan days (1-14)", |input| {
            let days = parse_loan_days(input).map_err(|e| e.to_string())?;
            validate_loan_days(days).map_err(|e| e.to_string())?;
            Ok(days)
        })?;

        let loan = session
            .create_loan(LoanRequest::new(customer_key, unit_key, loan_days).on(loan_date))?;
        print_success(&format!(
            "Loan {} registered, due {}",
            loan.folio,
            format_date(loan.due_date)
        ));
    }
}

fn return_bicycle(session: &mut Session) -> CliResult<Flow> {
    if session.store().open_loans().is_empty() {
        print_info("No bicycles are currently on loan.");
        return Ok(Flow::Continue);
    }

    println!("\nActive loans:");
    print_report(session.store(), Report::Active, OutputFormat::Table)?;

    let store = session.store();
    let (folio, due_date) = prompt("Folio of the loan being returned", |input| {
        let folio = parse_key(input)?;
        store
            .find_loan(folio)
            .filter(|loan| loan.is_open())
            .map(|loan| (folio, loan.due_date))
            .ok_or_else(|| CoreError::OpenLoanNotFound(folio).to_string())
    })?;

    let today = session.today();
    let returned = prompt("Actual return date (mm-dd-yyyy, blank for today)", |input| {
        resolve_return_date(Some(input), today, due_date)
            .map(|_| input.trim().to_string())
            .map_err(|e| e.to_string())
    })?;

    let loan = session.record_return(folio, Some(&returned))?;
    let date = loan.actual_return_date.map(format_date).unwrap_or_default();
    print_success(&format!("Loan {} returned on {}", loan.folio, date));
    Ok(Flow::Continue)
}

// =============================================================================
// Reports
// =============================================================================

fn report(session: &Session, kind: Report) -> CliResult<Flow> {
    print_report(session.store(), kind, OutputFormat::Table)?;
    Ok(Flow::Continue)
}

fn units_report(session: &mut Session) -> CliResult<Flow> {
    report(session, Report::Units)
}

fn available_report(session: &mut Session) -> CliResult<Flow> {
    report(session, Report::Available)
}

fn customers_report(session: &mut Session) -> CliResult<Flow> {
    report(session, Report::Customers)
}

fn loans_report(session: &mut Session) -> CliResult<Flow> {
    report(session, Report::Loans)
}

fn active_report(session: &mut Session) -> CliResult<Flow> {
    report(session, Report::Active)
}

fn returns_report(session: &mut Session) -> CliResult<Flow> {
    report(session, Report::Returns)
}

// =============================================================================
// Export & Quit
// =============================================================================

fn export_data(session: &mut Session) -> CliResult<Flow> {
    let choice = Select::new()
        .with_prompt("Export")
        .items(&["CSV tables", "Excel workbook", "Back"])
        .default(0)
        .interact()?;

    match choice {
        0 => {
            let dir = session.export_csv(None)?;
            print_success(&format!("Exported CSV tables to {}", dir.display()));
        }
        1 => {
            let path = session.export_workbook(None)?;
            print_success(&format!("Exported workbook to {}", path.display()));
        }
        _ => {}
    }
    Ok(Flow::Continue)
}

fn quit(session: &mut Session) -> CliResult<Flow> {
    if session.is_dirty() && confirm("Save changes before leaving?", true)? {
        session.save()?;
        print_success("Changes saved.");
    }
    println!("Goodbye.");
    Ok(Flow::Quit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_ends_with_quit() {
        let last = MENU.last().unwrap();
        assert_eq!(last.label, "Quit");
        assert_eq!(MENU.len(), 12);
    }

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key(" 7 "), Ok(7));
        assert_eq!(parse_key("x").unwrap_err(), "'x' is not a valid key");
        assert!(parse_key("-1").is_err());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("26"), Ok(26));
        assert_eq!(parse_number("").unwrap_err(), "'' is not a number");
    }
}
