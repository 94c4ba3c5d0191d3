//! # Customer Repository
//!
//! `clientes.csv`: `Clave,Apellidos,Nombres,Telefono`.

use std::path::{Path, PathBuf};

use rodada_core::{Customer, Key};
use serde::{Deserialize, Serialize};

use super::{read_rows, write_rows};
use crate::error::DbResult;

/// Column names, in file order.
pub const HEADER: [&str; 4] = ["Clave", "Apellidos", "Nombres", "Telefono"];

#[derive(Debug, Serialize, Deserialize)]
struct CustomerRow {
    #[serde(rename = "Clave")]
    key: Key,
    #[serde(rename = "Apellidos")]
    last_name: String,
    #[serde(rename = "Nombres")]
    first_name: String,
    #[serde(rename = "Telefono")]
    phone: String,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            key: row.key,
            last_name: row.last_name,
            first_name: row.first_name,
            phone: row.phone,
        }
    }
}

impl From<&Customer> for CustomerRow {
    fn from(customer: &Customer) -> Self {
        CustomerRow {
            key: customer.key,
            last_name: customer.last_name.clone(),
            first_name: customer.first_name.clone(),
            phone: customer.phone.clone(),
        }
    }
}

/// Repository for the customers table.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    path: PathBuf,
}

impl CustomerRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CustomerRepository { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every customer. A missing file is an empty table.
    pub fn load(&self) -> DbResult<Vec<Customer>> {
        Ok(read_rows::<CustomerRow>(&self.path)?
            .into_iter()
            .map(|numbered| Customer::from(numbered.row))
            .collect())
    }

    /// Replaces the table with `customers`.
    pub fn save(&self, customers: &[Customer]) -> DbResult<()> {
        write_rows(&self.path, &HEADER, customers.iter().map(CustomerRow::from))
    }
}
