//! # Data Directory Management
//!
//! Where the tables live, and loading/saving the whole store at once.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Snapshot Persistence                               │
//! │                                                                         │
//! │  Startup                                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DataConfig::new(dir) ← File names and directory                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::load() ──► Loaded { store, unreadable }                     │
//! │       │   missing file      → empty table                              │
//! │       │   unreadable table  → warn!, empty table, path in `unreadable` │
//! │       ▼                                                                 │
//! │  ... operator works in memory ...                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::save(&store)            ← explicit export request           │
//! │  Database::export_workbook(&store) ← spreadsheet export                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no transaction log: every save is a full snapshot of the store.

use std::fs;
use std::path::{Path, PathBuf};

use rodada_core::EntityStore;
use tracing::{info, warn};

use crate::error::{DbError, DbResult};
use crate::export::workbook::write_workbook;
use crate::repository::{CustomerRepository, LoanRepository, UnitRepository};

// =============================================================================
// Configuration
// =============================================================================

/// Data directory configuration.
///
/// ## Example
/// ```rust
/// use rodada_db::DataConfig;
///
/// let config = DataConfig::new("/srv/rodada").workbook_file("reporte.xlsx");
/// assert!(config.workbook_path().ends_with("reporte.xlsx"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataConfig {
    /// Directory holding the three tables.
    /// Default: the working directory
    pub data_dir: PathBuf,

    /// Default: `unidades.csv`
    pub units_file: String,

    /// Default: `clientes.csv`
    pub customers_file: String,

    /// Default: `prestamos.csv`
    pub loans_file: String,

    /// Spreadsheet written by the Excel export.
    /// Default: `datos.xlsx`
    pub workbook_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            data_dir: PathBuf::from("."),
            units_file: "unidades.csv".to_string(),
            customers_file: "clientes.csv".to_string(),
            loans_file: "prestamos.csv".to_string(),
            workbook_file: "datos.xlsx".to_string(),
        }
    }
}

impl DataConfig {
    /// Creates a configuration rooted at `data_dir` with default file names.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        DataConfig {
            data_dir: data_dir.into(),
            ..DataConfig::default()
        }
    }

    /// Sets the spreadsheet file name.
    pub fn workbook_file(mut self, name: impl Into<String>) -> Self {
        self.workbook_file = name.into();
        self
    }

    pub fn units_path(&self) -> PathBuf {
        self.data_dir.join(&self.units_file)
    }

    pub fn customers_path(&self) -> PathBuf {
        self.data_dir.join(&self.customers_file)
    }

    pub fn loans_path(&self) -> PathBuf {
        self.data_dir.join(&self.loans_file)
    }

    /// A relative workbook name is resolved against the data directory.
    pub fn workbook_path(&self) -> PathBuf {
        self.data_dir.join(&self.workbook_file)
    }
}

// =============================================================================
// Database
// =============================================================================

/// What [`Database::load`] read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    pub store: EntityStore,

    /// Tables that failed to load and started empty.
    pub unreadable: Vec<PathBuf>,
}

impl Loaded {
    /// True when every table was read.
    pub fn is_complete(&self) -> bool {
        self.unreadable.is_empty()
    }
}

/// Flat-file database: three CSV tables in one directory.
#[derive(Debug, Clone)]
pub struct Database {
    config: DataConfig,
}

impl Database {
    pub fn new(config: DataConfig) -> Self {
        Database { config }
    }

    pub fn config(&self) -> &DataConfig {
        &self.config
    }

    pub fn units(&self) -> UnitRepository {
        UnitRepository::new(self.config.units_path())
    }

    pub fn customers(&self) -> CustomerRepository {
        CustomerRepository::new(self.config.customers_path())
    }

    pub fn loans(&self) -> LoanRepository {
        LoanRepository::new(self.config.loans_path())
    }

    /// Loads every table, failing on the first unreadable one.
    pub fn try_load(&self) -> DbResult<EntityStore> {
        Ok(EntityStore::restore(
            self.units().load()?,
            self.customers().load()?,
            self.loans().load()?,
        ))
    }

    /// Loads every table, starting any unreadable one empty.
    ///
    /// ## Why Per Table?
    /// A corrupt loans file should not also throw away the inventory. The
    /// paths of the tables that failed are returned so the caller can keep
    /// from saving over them.
    pub fn load(&self) -> Loaded {
        let mut unreadable = Vec::new();
        let store = EntityStore::restore(
            or_empty(self.config.units_path(), self.units().load(), &mut unreadable),
            or_empty(self.config.customers_path(), self.customers().load(), &mut unreadable),
            or_empty(self.config.loans_path(), self.loans().load(), &mut unreadable),
        );

        info!(
            data_dir = %self.config.data_dir.display(),
            units = store.units().len(),
            customers = store.customers().len(),
            loans = store.loans().len(),
            unreadable = unreadable.len(),
            "Loaded data"
        );
        Loaded { store, unreadable }
    }

    /// Writes all three tables.
    pub fn save(&self, store: &EntityStore) -> DbResult<()> {
        ensure_dir(&self.config.data_dir)?;

        self.units().save(store.units())?;
        self.customers().save(store.customers())?;
        self.loans().save(store.loans())?;

        info!(data_dir = %self.config.data_dir.display(), "Saved data");
        Ok(())
    }

    /// Writes the spreadsheet export and returns its path.
    pub fn export_workbook(&self, store: &EntityStore) -> DbResult<PathBuf> {
        let path = self.config.workbook_path();
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }

        write_workbook(store, &path)?;
        Ok(path)
    }
}

fn or_empty<T>(path: PathBuf, result: DbResult<Vec<T>>, unreadable: &mut Vec<PathBuf>) -> Vec<T> {
    result.unwrap_or_else(|err| {
        warn!(path = %path.display(), error = %err, "Could not load table, starting with it empty");
        unreadable.push(path);
        Vec::new()
    })
}

fn ensure_dir(dir: &Path) -> DbResult<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|e| DbError::io(dir, e))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rodada_core::{FixedClock, LoanEngine, LoanRequest};

    fn busy_store() -> EntityStore {
        let mut store = EntityStore::new();
        store.add_unit(26).unwrap();
        store.add_unit(20).unwrap();
        store.add_unit(29).unwrap();
        store.add_customer("Garza López", "Ana", "8112345678").unwrap();
        store.add_customer("Peña", "José Ángel", "0187654321").unwrap();

        let engine = LoanEngine::new(FixedClock::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
        engine
            .create_loan(&mut store, LoanRequest::new(1, 1, 5).on("01-01-2025"))
            .unwrap();
        engine
            .create_loan(&mut store, LoanRequest::new(2, 2, 3))
            .unwrap();
        engine
            .record_return(&mut store, 1, Some("01-06-2025"))
            .unwrap();
        store
    }

    #[test]
    fn test_config_defaults() {
        let config = DataConfig::default();
        assert_eq!(config.units_path(), PathBuf::from("./unidades.csv"));
        assert_eq!(config.customers_path(), PathBuf::from("./clientes.csv"));
        assert_eq!(config.loans_path(), PathBuf::from("./prestamos.csv"));
        assert_eq!(config.workbook_path(), PathBuf::from("./datos.xlsx"));
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(DataConfig::new(dir.path()));
        let store = busy_store();

        db.save(&store).unwrap();
        let reloaded = db.try_load().unwrap();

        assert_eq!(reloaded, store);
        assert_eq!(reloaded.open_loans().len(), 1);
        assert_eq!(reloaded.closed_loans().len(), 1);
    }

    #[test]
    fn test_missing_directory_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(DataConfig::new(dir.path().join("nowhere")));

        let loaded = db.load();
        assert_eq!(loaded.store, EntityStore::new());
        assert!(loaded.is_complete());
    }

    #[test]
    fn test_save_creates_directory_and_headers() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("nested").join("data");
        let db = Database::new(DataConfig::new(&data_dir));

        db.save(&EntityStore::new()).unwrap();

        let customers = fs::read_to_string(data_dir.join("clientes.csv")).unwrap();
        assert_eq!(customers, "Clave,Apellidos,Nombres,Telefono\n");
        assert!(!data_dir.join("clientes.csv.tmp").exists());
    }

    #[test]
    fn test_corrupt_table_degrades_alone() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(DataConfig::new(dir.path()));
        db.save(&busy_store()).unwrap();

        fs::write(db.config().loans_path(), "Folio,Clave Unidad\nabc,1\n").unwrap();

        assert!(db.try_load().is_err());

        let loaded = db.load();
        assert_eq!(loaded.store.units().len(), 3);
        assert_eq!(loaded.store.customers().len(), 2);
        assert!(loaded.store.loans().is_empty());
        assert_eq!(loaded.unreadable, vec![db.config().loans_path()]);
    }

    #[test]
    fn test_export_workbook_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(DataConfig::new(dir.path()).workbook_file("reporte.xlsx"));

        let path = db.export_workbook(&busy_store()).unwrap();

        assert_eq!(path, dir.path().join("reporte.xlsx"));
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }
}
