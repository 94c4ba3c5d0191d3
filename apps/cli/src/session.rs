//! # Working Session
//!
//! The in-memory store paired with the files it came from.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Session                                          │
//! │                                                                         │
//! │  Database ──load()──► EntityStore ◄── LoanEngine (clock)               │
//! │      ▲                     │                                            │
//! │      └──────save()─────────┘  dirty = true after every mutation        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All mutation goes through `&mut self`, so one session has exactly one
//! writer. Two processes on the same directory are not coordinated.
//!
//! A table that failed to load is never written back: saving into the data
//! directory fails with `DbError::UnreadableTable` until the file is fixed.
//! Exporting CSV to another directory still works.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rodada_core::{
    Clock, Customer, EntityStore, Folio, Loan, LoanEngine, LoanRequest, SystemClock, Unit,
};
use rodada_db::{write_workbook, DataConfig, Database, DbError};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::CliResult;

pub struct Session<C: Clock = SystemClock> {
    db: Database,
    store: EntityStore,
    unreadable: Vec<PathBuf>,
    clock: C,
    dirty: bool,
}

impl Session<SystemClock> {
    /// Opens the configured data directory, loading whatever is readable.
    pub fn open(config: &AppConfig) -> Self {
        Session::with_clock(Database::new(config.data_config()), SystemClock)
    }
}

impl<C: Clock> Session<C> {
    pub fn with_clock(db: Database, clock: C) -> Self {
        let loaded = db.load();
        Session {
            db,
            store: loaded.store,
            unreadable: loaded.unreadable,
            clock,
            dirty: false,
        }
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Tables that failed to load; they started empty.
    pub fn unreadable(&self) -> &[PathBuf] {
        &self.unreadable
    }

    /// True when the store holds changes not yet written.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub fn add_unit(&mut self, wheel_size: i64) -> CliResult<Unit> {
        let unit = self.store.add_unit(wheel_size)?;
        self.dirty = true;
        debug!(key = unit.key, wheel_size = %unit.wheel_size, "Registered unit");
        Ok(unit)
    }

    pub fn add_customer(
        &mut self,
        last_name: &str,
        first_name: &str,
        phone: &str,
    ) -> CliResult<Customer> {
        let customer = self.store.add_customer(last_name, first_name, phone)?;
        self.dirty = true;
        debug!(key = customer.key, "Registered customer");
        Ok(customer)
    }

    pub fn create_loan(&mut self, request: LoanRequest) -> CliResult<Loan> {
        let engine = LoanEngine::new(&self.clock);
        let loan = engine.create_loan(&mut self.store, request)?;
        self.dirty = true;
        debug!(
            folio = loan.folio,
            unit = loan.unit_key,
            customer = loan.customer_key,
            "Created loan"
        );
        Ok(loan)
    }

    pub fn record_return(&mut self, folio: Folio, date: Option<&str>) -> CliResult<Loan> {
        let engine = LoanEngine::new(&self.clock);
        let loan = engine.record_return(&mut self.store, folio, date)?;
        self.dirty = true;
        debug!(folio, "Recorded return");
        Ok(loan)
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Writes the tables back to the data directory.
    pub fn save(&mut self) -> CliResult<()> {
        if let Some(path) = self.unreadable.first() {
            return Err(DbError::UnreadableTable { path: path.clone() }.into());
        }

        self.db.save(&self.store)?;
        self.dirty = false;
        Ok(())
    }

    /// Writes the tables as CSV, to `dir` or to the data directory.
    ///
    /// Saving elsewhere leaves the session dirty.
    pub fn export_csv(&mut self, dir: Option<&Path>) -> CliResult<PathBuf> {
        match dir {
            None => {
                self.save()?;
                Ok(self.db.config().data_dir.clone())
            }
            Some(dir) => {
                Database::new(DataConfig::new(dir)).save(&self.store)?;
                info!(dir = %dir.display(), "Exported CSV tables");
                Ok(dir.to_path_buf())
            }
        }
    }

    /// Writes the spreadsheet, to `path` or to the configured workbook.
    pub fn export_workbook(&self, path: Option<&Path>) -> CliResult<PathBuf> {
        match path {
            None => Ok(self.db.export_workbook(&self.store)?),
            Some(path) => {
                write_workbook(&self.store, path)?;
                Ok(path.to_path_buf())
            }
        }
    }
}
