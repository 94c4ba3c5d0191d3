//! Report commands

use clap::ValueEnum;
use rodada_core::validation::format_date;
use rodada_core::{available_units, Customer, EntityStore, Loan, Unit};
use serde::Serialize;
use tabled::Tabled;

use crate::error::CliResult;
use crate::output::{print_output, OutputFormat};

/// Which report to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Report {
    /// Every registered unit
    Units,
    /// Units not on an open loan
    Available,
    /// Every registered customer
    Customers,
    /// Every loan, open or returned
    Loans,
    /// Open loans
    Active,
    /// Returned loans
    Returns,
}

/// Table row for unit display
#[derive(Debug, Serialize, Tabled)]
pub struct UnitRow {
    #[tabled(rename = "Clave")]
    pub key: u32,
    #[tabled(rename = "Rodada")]
    pub wheel_size: u8,
}

impl From<&Unit> for UnitRow {
    fn from(unit: &Unit) -> Self {
        Self {
            key: unit.key,
            wheel_size: unit.wheel_size.inches(),
        }
    }
}

/// Table row for customer display
#[derive(Debug, Serialize, Tabled)]
pub struct CustomerRow {
    #[tabled(rename = "Clave")]
    pub key: u32,
    #[tabled(rename = "Apellidos")]
    pub last_name: String,
    #[tabled(rename = "Nombres")]
    pub first_name: String,
    #[tabled(rename = "Telefono")]
    pub phone: String,
}

impl From<&Customer> for CustomerRow {
    fn from(customer: &Customer) -> Self {
        Self {
            key: customer.key,
            last_name: customer.last_name.clone(),
            first_name: customer.first_name.clone(),
            phone: customer.phone.clone(),
        }
    }
}

/// Table row for loan display
#[derive(Debug, Serialize, Tabled)]
pub struct LoanRow {
    #[tabled(rename = "Folio")]
    pub folio: u32,
    #[tabled(rename = "Clave Unidad")]
    pub unit_key: u32,
    #[tabled(rename = "Clave Cliente")]
    pub customer_key: u32,
    #[tabled(rename = "Fecha Prestamo")]
    pub loan_date: String,
    #[tabled(rename = "Dias Prestamo")]
    pub loan_days: u32,
    #[tabled(rename = "Fecha Retorno")]
    pub due_date: String,
    #[tabled(rename = "Fecha Retorno Efectiva", display_with = "display_returned")]
    pub actual_return_date: Option<String>,
}

fn display_returned(date: &Option<String>) -> String {
    date.clone().unwrap_or_default()
}

impl From<&Loan> for LoanRow {
    fn from(loan: &Loan) -> Self {
        Self {
            folio: loan.folio,
            unit_key: loan.unit_key,
            customer_key: loan.customer_key,
            loan_date: format_date(loan.loan_date),
            loan_days: loan.loan_days,
            due_date: format_date(loan.due_date),
            actual_return_date: loan.actual_return_date.map(format_date),
        }
    }
}

/// Prints one report of the store.
pub fn print_report(store: &EntityStore, report: Report, format: OutputFormat) -> CliResult<()> {
    match report {
        Report::Units => print_output(
            store.units().iter().map(UnitRow::from).collect(),
            format,
            "No units registered",
        ),
        Report::Available => print_output(
            available_units(store).into_iter().map(UnitRow::from).collect(),
            format,
            "No units available",
        ),
        Report::Customers => print_output(
            store.customers().iter().map(CustomerRow::from).collect(),
            format,
            "No customers registered",
        ),
        Report::Loans => print_output(
            store.loans().iter().map(LoanRow::from).collect(),
            format,
            "No loans registered",
        ),
        Report::Active => print_output(
            store.open_loans().into_iter().map(LoanRow::from).collect(),
            format,
            "No active loans",
        ),
        Report::Returns => print_output(
            store.closed_loans().into_iter().map(LoanRow::from).collect(),
            format,
            "No returns registered",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_loan_row_formats_dates() {
        let date = |d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap();
        let mut loan = Loan {
            folio: 3,
            unit_key: 2,
            customer_key: 1,
            loan_date: date(1),
            loan_days: 5,
            due_date: date(6),
            actual_return_date: None,
        };

        let row = LoanRow::from(&loan);
        assert_eq!(row.loan_date, "01-01-2025");
        assert_eq!(row.due_date, "01-06-2025");
        assert_eq!(display_returned(&row.actual_return_date), "");

        loan.actual_return_date = Some(date(7));
        let row = LoanRow::from(&loan);
        assert_eq!(row.actual_return_date.as_deref(), Some("01-07-2025"));
    }

    #[test]
    fn test_json_rows_use_field_names() {
        let mut store = EntityStore::new();
        store.add_unit(29).unwrap();

        let rows: Vec<UnitRow> = store.units().iter().map(UnitRow::from).collect();
        let json = serde_json::to_value(&rows).unwrap();

        assert_eq!(json, serde_json::json!([{ "key": 1, "wheel_size": 29 }]));
    }
}
