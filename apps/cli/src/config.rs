//! # Application Configuration
//!
//! Where the data lives, resolved once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--data-dir`, `--workbook`)
//! 2. Environment variables (`RODADA_*`)
//! 3. Defaults (this file)

use std::path::PathBuf;

use rodada_db::DataConfig;
use serde::Serialize;

pub const DATA_DIR_VAR: &str = "RODADA_DATA_DIR";
pub const WORKBOOK_VAR: &str = "RODADA_WORKBOOK";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Directory holding the CSV tables.
    /// Default: the working directory
    pub data_dir: PathBuf,

    /// Spreadsheet written by `export xlsx`, relative to `data_dir`.
    /// Default: `datos.xlsx`
    pub workbook_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data = DataConfig::default();
        AppConfig {
            data_dir: data.data_dir,
            workbook_file: data.workbook_file,
        }
    }
}

impl AppConfig {
    /// Creates a configuration from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `RODADA_DATA_DIR`: directory of the tables
    /// - `RODADA_WORKBOOK`: spreadsheet file name
    pub fn from_env() -> Self {
        let mut config = AppConfig::default();

        if let Ok(dir) = std::env::var(DATA_DIR_VAR) {
            if !dir.trim().is_empty() {
                config.data_dir = PathBuf::from(dir);
            }
        }

        if let Ok(name) = std::env::var(WORKBOOK_VAR) {
            if !name.trim().is_empty() {
                config.workbook_file = name;
            }
        }

        config
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, data_dir: Option<PathBuf>, workbook: Option<String>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        if let Some(name) = workbook {
            self.workbook_file = name;
        }
        self
    }

    pub fn data_config(&self) -> DataConfig {
        DataConfig::new(&self.data_dir).workbook_file(&self.workbook_file)
    }
}
