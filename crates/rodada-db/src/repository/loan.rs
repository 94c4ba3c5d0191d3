//! # Loan Repository
//!
//! `prestamos.csv`, one row per loan:
//!
//! ```text
//! Folio,Clave Unidad,Clave Cliente,Fecha Prestamo,Dias Prestamo,Fecha Retorno,Fecha Retorno Efectiva
//! 1,1,1,01-01-2025,5,01-06-2025,01-06-2025     ← returned
//! 2,2,1,01-03-2025,3,01-06-2025,               ← still open
//! ```

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rodada_core::validation::{format_date, parse_date};
use rodada_core::{Folio, Key, Loan};
use serde::{Deserialize, Serialize};

use super::{read_rows, write_rows};
use crate::error::{DbError, DbResult};

/// Column names, in file order.
pub const HEADER: [&str; 7] = [
    "Folio",
    "Clave Unidad",
    "Clave Cliente",
    "Fecha Prestamo",
    "Dias Prestamo",
    "Fecha Retorno",
    "Fecha Retorno Efectiva",
];

#[derive(Debug, Serialize, Deserialize)]
struct LoanRow {
    #[serde(rename = "Folio")]
    folio: Folio,
    #[serde(rename = "Clave Unidad")]
    unit_key: Key,
    #[serde(rename = "Clave Cliente")]
    customer_key: Key,
    #[serde(rename = "Fecha Prestamo")]
    loan_date: String,
    #[serde(rename = "Dias Prestamo")]
    loan_days: u32,
    #[serde(rename = "Fecha Retorno")]
    due_date: String,
    #[serde(rename = "Fecha Retorno Efectiva", default)]
    actual_return_date: String,
}

impl From<&Loan> for LoanRow {
    fn from(loan: &Loan) -> Self {
        LoanRow {
            folio: loan.folio,
            unit_key: loan.unit_key,
            customer_key: loan.customer_key,
            loan_date: format_date(loan.loan_date),
            loan_days: loan.loan_days,
            due_date: format_date(loan.due_date),
            actual_return_date: loan.actual_return_date.map(format_date).unwrap_or_default(),
        }
    }
}

/// Repository for the loans table.
#[derive(Debug, Clone)]
pub struct LoanRepository {
    path: PathBuf,
}

impl LoanRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LoanRepository { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every loan. A missing file is an empty table.
    ///
    /// ## Returns
    /// * `Err(DbError::InvalidRecord)` - A date is not `mm-dd-yyyy`
    pub fn load(&self) -> DbResult<Vec<Loan>> {
        read_rows::<LoanRow>(&self.path)?
            .into_iter()
            .map(|numbered| -> DbResult<Loan> {
                let row = numbered.row;
                let date = |column: &str, text: &str| -> DbResult<NaiveDate> {
                    parse_date(text).ok_or_else(|| {
                        DbError::invalid_record(
                            &self.path,
                            numbered.line,
                            format!("{column} '{text}' is not mm-dd-yyyy"),
                        )
                    })
                };

                let actual_return_date = if row.actual_return_date.is_empty() {
                    None
                } else {
                    Some(date("Fecha Retorno Efectiva", &row.actual_return_date)?)
                };

                Ok(Loan {
                    folio: row.folio,
                    unit_key: row.unit_key,
                    customer_key: row.customer_key,
                    loan_date: date("Fecha Prestamo", &row.loan_date)?,
                    loan_days: row.loan_days,
                    due_date: date("Fecha Retorno", &row.due_date)?,
                    actual_return_date,
                })
            })
            .collect()
    }

    /// Replaces the table with `loans`.
    pub fn save(&self, loans: &[Loan]) -> DbResult<()> {
        write_rows(&self.path, &HEADER, loans.iter().map(LoanRow::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_writes_open_loan_with_empty_return_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prestamos.csv");
        let loans = vec![
            Loan {
                folio: 1,
                unit_key: 1,
                customer_key: 1,
                loan_date: date(2025, 1, 1),
                loan_days: 5,
                due_date: date(2025, 1, 6),
                actual_return_date: Some(date(2025, 1, 6)),
            },
            Loan {
                folio: 2,
                unit_key: 2,
                customer_key: 1,
                loan_date: date(2025, 1, 3),
                loan_days: 3,
                due_date: date(2025, 1, 6),
                actual_return_date: None,
            },
        ];

        let repo = LoanRepository::new(&path);
        repo.save(&loans).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], HEADER.join(","));
        assert_eq!(lines[1], "1,1,1,01-01-2025,5,01-06-2025,01-06-2025");
        assert_eq!(lines[2], "2,2,1,01-03-2025,3,01-06-2025,");

        assert_eq!(repo.load().unwrap(), loans);
    }

    #[test]
    fn test_rejects_malformed_date() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prestamos.csv");
        fs::write(
            &path,
            format!("{}\n1,1,1,2025-01-01,5,01-06-2025,\n", HEADER.join(",")),
        )
        .unwrap();

        let err = LoanRepository::new(&path).load().unwrap_err();
        assert!(matches!(err, DbError::InvalidRecord { line: 2, .. }));
        assert!(err.to_string().contains("Fecha Prestamo"));
    }
}
