//! # Unit Repository
//!
//! `unidades.csv`: `Clave,Rodada`.

use std::path::{Path, PathBuf};

use rodada_core::{Key, Unit, WheelSize};
use serde::{Deserialize, Serialize};

use super::{read_rows, write_rows};
use crate::error::{DbError, DbResult};

/// Column names, in file order.
pub const HEADER: [&str; 2] = ["Clave", "Rodada"];

#[derive(Debug, Serialize, Deserialize)]
struct UnitRow {
    #[serde(rename = "Clave")]
    key: Key,
    #[serde(rename = "Rodada")]
    wheel_size: i64,
}

impl From<&Unit> for UnitRow {
    fn from(unit: &Unit) -> Self {
        UnitRow {
            key: unit.key,
            wheel_size: unit.wheel_size.into(),
        }
    }
}

/// Repository for the units table.
#[derive(Debug, Clone)]
pub struct UnitRepository {
    path: PathBuf,
}

impl UnitRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        UnitRepository { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every unit.
    ///
    /// ## Returns
    /// * `Ok(vec![])` - File does not exist
    /// * `Err(DbError::InvalidRecord)` - A `Rodada` is not 20, 26 or 29
    pub fn load(&self) -> DbResult<Vec<Unit>> {
        read_rows::<UnitRow>(&self.path)?
            .into_iter()
            .map(|numbered| -> DbResult<Unit> {
                let wheel_size = WheelSize::try_from(numbered.row.wheel_size).map_err(|e| {
                    DbError::invalid_record(&self.path, numbered.line, e.to_string())
                })?;
                Ok(Unit {
                    key: numbered.row.key,
                    wheel_size,
                })
            })
            .collect()
    }

    /// Replaces the table with `units`.
    pub fn save(&self, units: &[Unit]) -> DbResult<()> {
        write_rows(&self.path, &HEADER, units.iter().map(UnitRow::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_reads_file_written_by_hand() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unidades.csv");
        fs::write(&path, "Clave,Rodada\n1,26\n2,20\n3,29\n").unwrap();

        let units = UnitRepository::new(&path).load().unwrap();
        assert_eq!(units.len(), 3);
        assert_eq!(units[0].wheel_size, WheelSize::R26);
        assert_eq!(units[2].key, 3);
    }

    #[test]
    fn test_rejects_unknown_wheel_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unidades.csv");
        fs::write(&path, "Clave,Rodada\n1,26\n2,24\n").unwrap();

        let err = UnitRepository::new(&path).load().unwrap_err();
        assert!(matches!(err, DbError::InvalidRecord { line: 3, .. }));
    }

    #[test]
    fn test_empty_table_keeps_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unidades.csv");

        UnitRepository::new(&path).save(&[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Clave,Rodada\n");
    }
}
