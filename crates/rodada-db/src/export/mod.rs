//! Read-only exports of the store.
//!
//! The CSV export is [`crate::Database::save`]; this module adds the
//! spreadsheet.

pub mod workbook;
