//! # rodada-db: Flat-File Persistence for Rodada
//!
//! This crate loads and saves the shop's records as three CSV tables and
//! exports them as a spreadsheet.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Rodada Data Flow                                 │
//! │                                                                         │
//! │  rodada CLI (startup / export)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     rodada-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │   Export     │  │   │
//! │  │   │ (database.rs) │    │  (unit.rs)    │    │ (workbook.rs)│  │   │
//! │  │   │               │    │  (customer.rs)│    │              │  │   │
//! │  │   │ DataConfig    │◄───│  (loan.rs)    │    │  datos.xlsx  │  │   │
//! │  │   │ load / save   │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  unidades.csv   clientes.csv   prestamos.csv                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`database`] - Data directory configuration, load and save
//! - [`repository`] - One CSV table per entity
//! - [`export`] - Spreadsheet export
//! - [`error`] - Persistence error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rodada_db::{DataConfig, Database};
//!
//! let db = Database::new(DataConfig::new("./datos"));
//! let loaded = db.load();
//! if loaded.is_complete() {
//!     db.save(&loaded.store)?;
//! }
//! # Ok::<(), rodada_db::DbError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod database;
pub mod error;
pub mod export;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use database::{DataConfig, Database, Loaded};
pub use error::{DbError, DbResult};
pub use export::workbook::write_workbook;
