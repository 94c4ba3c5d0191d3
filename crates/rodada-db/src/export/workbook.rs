//! # Spreadsheet Export
//!
//! Writes the store as an `.xlsx` workbook with one sheet per report.
//!
//! ```text
//! ┌──────────────┬──────────────┬─────────────────────┬──────────────┐
//! │  Unidades    │  Clientes    │  Préstamos Activos  │ Devoluciones │
//! │  all units   │ all customers│  open loans         │ closed loans │
//! └──────────────┴──────────────┴─────────────────────┴──────────────┘
//! ```
//!
//! Headers are the human-readable column names, with accents. Dates are
//! written as `mm-dd-yyyy` text, exactly as in the CSV tables.

use std::path::Path;

use rodada_core::validation::format_date;
use rodada_core::{EntityStore, Loan};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::info;

use crate::error::DbResult;

pub const UNITS_SHEET: &str = "Unidades";
pub const CUSTOMERS_SHEET: &str = "Clientes";
pub const ACTIVE_LOANS_SHEET: &str = "Préstamos Activos";
pub const RETURNS_SHEET: &str = "Devoluciones";

const UNIT_HEADERS: [&str; 2] = ["Clave", "Rodada"];
const CUSTOMER_HEADERS: [&str; 4] = ["Clave", "Apellidos", "Nombres", "Teléfono"];
const LOAN_HEADERS: [&str; 7] = [
    "Folio",
    "Clave Unidad",
    "Clave Cliente",
    "Fecha Préstamo",
    "Días Préstamo",
    "Fecha Retorno",
    "Fecha Retorno Efectiva",
];

/// Writes the four-sheet workbook to `path`.
pub fn write_workbook(store: &EntityStore, path: &Path) -> DbResult<()> {
    let header = Format::new().set_bold();
    let mut workbook = Workbook::new();

    let mut units = sheet(UNITS_SHEET, &UNIT_HEADERS, &header)?;
    for (row, unit) in (1u32..).zip(store.units()) {
        units.write_number(row, 0, unit.key)?;
        units.write_number(row, 1, unit.wheel_size.inches())?;
    }
    workbook.push_worksheet(finish(units));

    let mut customers = sheet(CUSTOMERS_SHEET, &CUSTOMER_HEADERS, &header)?;
    for (row, customer) in (1u32..).zip(store.customers()) {
        customers.write_number(row, 0, customer.key)?;
        customers.write_string(row, 1, &customer.last_name)?;
        customers.write_string(row, 2, &customer.first_name)?;
        customers.write_string(row, 3, &customer.phone)?;
    }
    workbook.push_worksheet(finish(customers));

    let mut active = sheet(ACTIVE_LOANS_SHEET, &LOAN_HEADERS, &header)?;
    write_loans(&mut active, &store.open_loans())?;
    workbook.push_worksheet(finish(active));

    let mut returns = sheet(RETURNS_SHEET, &LOAN_HEADERS, &header)?;
    write_loans(&mut returns, &store.closed_loans())?;
    workbook.push_worksheet(finish(returns));

    workbook.save(path)?;

    info!(path = %path.display(), "Exported workbook");
    Ok(())
}

/// A named worksheet with a bold header row.
fn sheet(name: &str, headers: &[&str], format: &Format) -> Result<Worksheet, XlsxError> {
    let mut sheet = Worksheet::new();
    sheet.set_name(name)?;
    for (col, title) in (0u16..).zip(headers) {
        sheet.write_string_with_format(0, col, *title, format)?;
    }
    Ok(sheet)
}

fn finish(mut sheet: Worksheet) -> Worksheet {
    sheet.autofit();
    sheet
}

fn write_loans(sheet: &mut Worksheet, loans: &[&Loan]) -> Result<(), XlsxError> {
    for (row, loan) in (1u32..).zip(loans) {
        sheet.write_number(row, 0, loan.folio)?;
        sheet.write_number(row, 1, loan.unit_key)?;
        sheet.write_number(row, 2, loan.customer_key)?;
        sheet.write_string(row, 3, format_date(loan.loan_date))?;
        sheet.write_number(row, 4, loan.loan_days)?;
        sheet.write_string(row, 5, format_date(loan.due_date))?;
        if let Some(returned) = loan.actual_return_date {
            sheet.write_string(row, 6, format_date(returned))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook, Data, Range, Reader, Xlsx};
    use chrono::NaiveDate;
    use rodada_core::{FixedClock, LoanEngine, LoanRequest};

    /// Two units lent; loan 1 returned, loan 2 still out.
    fn lent_store() -> EntityStore {
        let mut store = EntityStore::new();
        store.add_unit(26).unwrap();
        store.add_unit(20).unwrap();
        store.add_customer("Garza López", "Ana", "8112345678").unwrap();

        let engine = LoanEngine::new(FixedClock::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
        engine
            .create_loan(&mut store, LoanRequest::new(1, 1, 5).on("01-01-2025"))
            .unwrap();
        engine
            .create_loan(&mut store, LoanRequest::new(1, 2, 3))
            .unwrap();
        engine
            .record_return(&mut store, 1, Some("01-06-2025"))
            .unwrap();
        store
    }

    fn header(range: &Range<Data>) -> Vec<String> {
        range.rows().next().unwrap().iter().map(|cell| cell.to_string()).collect()
    }

    fn first_column(range: &Range<Data>) -> Vec<Data> {
        range.rows().skip(1).map(|row| row[0].clone()).collect()
    }

    #[test]
    fn test_sheet_names_are_valid() {
        let format = Format::new();
        for name in [UNITS_SHEET, CUSTOMERS_SHEET, ACTIVE_LOANS_SHEET, RETURNS_SHEET] {
            assert!(sheet(name, &UNIT_HEADERS, &format).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_empty_store_exports() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("datos.xlsx");

        write_workbook(&EntityStore::new(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_workbook_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("datos.xlsx");
        write_workbook(&lent_store(), &path).unwrap();

        let mut book: Xlsx<_> = open_workbook(&path).unwrap();
        assert_eq!(
            book.sheet_names(),
            vec!["Unidades", "Clientes", "Préstamos Activos", "Devoluciones"]
        );

        let units = book.worksheet_range(UNITS_SHEET).unwrap();
        assert_eq!(header(&units), vec!["Clave", "Rodada"]);
        assert_eq!(units.rows().nth(2).unwrap()[1], Data::Float(20.0));

        let customers = book.worksheet_range(CUSTOMERS_SHEET).unwrap();
        assert_eq!(header(&customers), vec!["Clave", "Apellidos", "Nombres", "Teléfono"]);
        assert_eq!(
            customers.rows().nth(1).unwrap()[1],
            Data::String("Garza López".to_string())
        );

        let active = book.worksheet_range(ACTIVE_LOANS_SHEET).unwrap();
        assert_eq!(header(&active), LOAN_HEADERS.to_vec());
        assert_eq!(first_column(&active), vec![Data::Float(2.0)]);
        assert_eq!(
            active.rows().nth(1).unwrap()[5],
            Data::String("01-04-2025".to_string())
        );

        let returns = book.worksheet_range(RETURNS_SHEET).unwrap();
        assert_eq!(header(&returns), LOAN_HEADERS.to_vec());
        assert_eq!(first_column(&returns), vec![Data::Float(1.0)]);
        assert_eq!(
            returns.rows().nth(1).unwrap()[6],
            Data::String("01-06-2025".to_string())
        );
    }
}
