//! Export commands

use std::path::PathBuf;

use clap::Subcommand;

use crate::error::CliResult;
use crate::output::print_success;
use crate::session::Session;

/// Export subcommands
#[derive(Debug, Subcommand)]
pub enum ExportCommands {
    /// Write the three CSV tables
    Csv {
        /// Target directory; defaults to the data directory
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Write the spreadsheet workbook
    Xlsx {
        /// Target file; defaults to the configured workbook
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
}

/// Execute an export command
pub fn execute(command: ExportCommands, session: &mut Session) -> CliResult<()> {
    match command {
        ExportCommands::Csv { dir } => {
            let dir = session.export_csv(dir.as_deref())?;
            print_success(&format!("Exported CSV tables to {}", dir.display()));
        }
        ExportCommands::Xlsx { path } => {
            let path = session.export_workbook(path.as_deref())?;
            print_success(&format!("Exported workbook to {}", path.display()));
        }
    }
    Ok(())
}
