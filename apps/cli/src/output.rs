//! Output formatting utilities

use colored::*;
use serde::Serialize;
use tabled::{Table, Tabled};

use crate::error::CliResult;

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Grid table
    #[default]
    Table,
    /// JSON array
    Json,
}

/// Print rows in the specified format.
///
/// An empty table prints `empty_notice` instead; an empty JSON report is `[]`.
pub fn print_output<T: Serialize + Tabled>(
    rows: Vec<T>,
    format: OutputFormat,
    empty_notice: &str,
) -> CliResult<()> {
    match format {
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("{}", empty_notice.dimmed());
            } else {
                println!("{}", Table::new(rows));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }
    Ok(())
}

/// Print a single record in the specified format
pub fn print_single<T: Serialize + Tabled>(row: T, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new([row])),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&row)?),
    }
    Ok(())
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }
}
