//! # Repository Module
//!
//! One CSV table per entity.
//!
//! ## Table Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  unidades.csv    Clave,Rodada                                           │
//! │  clientes.csv    Clave,Apellidos,Nombres,Telefono                       │
//! │  prestamos.csv   Folio,Clave Unidad,Clave Cliente,Fecha Prestamo,       │
//! │                  Dias Prestamo,Fecha Retorno,Fecha Retorno Efectiva     │
//! │                                                                         │
//! │  • header row always present, even for an empty table                  │
//! │  • dates as mm-dd-yyyy                                                 │
//! │  • empty "Fecha Retorno Efectiva" = loan still open                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`UnitRepository`] - `unidades.csv`
//! - [`CustomerRepository`] - `clientes.csv`
//! - [`LoanRepository`] - `prestamos.csv`

pub mod customer;
pub mod loan;
pub mod unit;

pub use customer::CustomerRepository;
pub use loan::LoanRepository;
pub use unit::UnitRepository;

use std::ffi::OsString;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// A deserialized row and the file line it came from.
pub(crate) struct Numbered<R> {
    pub line: usize,
    pub row: R,
}

/// Reads every row of `path`, matching columns by header name.
///
/// A missing file is an empty table.
pub(crate) fn read_rows<R: DeserializeOwned>(path: &Path) -> DbResult<Vec<Numbered<R>>> {
    if !path.exists() {
        debug!(path = %path.display(), "Table file missing, starting empty");
        return Ok(Vec::new());
    }

    let file = File::open(path).map_err(|e| DbError::io(path, e))?;
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(file);
    let headers = reader.headers().map_err(|e| DbError::csv(path, e))?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| DbError::csv(path, e))?;
        let line = record.position().map_or(0, |pos| pos.line() as usize);
        let row = record
            .deserialize(Some(&headers))
            .map_err(|e| DbError::invalid_record(path, line, e.to_string()))?;
        rows.push(Numbered { line, row });
    }

    debug!(path = %path.display(), count = rows.len(), "Read table");
    Ok(rows)
}

/// Replaces `path` with `header` followed by `rows`.
///
/// The table is written next to the target and renamed over it, so a failed
/// save never leaves a half-written file behind.
pub(crate) fn write_rows<R: Serialize>(
    path: &Path,
    header: &[&str],
    rows: impl IntoIterator<Item = R>,
) -> DbResult<()> {
    let staging = staging_path(path);

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(&staging)
        .map_err(|e| DbError::csv(&staging, e))?;

    writer
        .write_record(header)
        .map_err(|e| DbError::csv(&staging, e))?;
    for row in rows {
        writer.serialize(row).map_err(|e| DbError::csv(&staging, e))?;
    }
    writer.flush().map_err(|e| DbError::io(&staging, e))?;
    drop(writer);

    fs::rename(&staging, path).map_err(|e| DbError::io(path, e))?;

    debug!(path = %path.display(), "Wrote table");
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
