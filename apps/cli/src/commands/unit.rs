//! Unit (bicycle) commands

use clap::Subcommand;

use crate::commands::report::UnitRow;
use crate::error::CliResult;
use crate::output::{print_single, print_success, OutputFormat};
use crate::session::Session;

/// Unit subcommands
#[derive(Debug, Subcommand)]
pub enum UnitCommands {
    /// Register a bicycle
    Add {
        /// Wheel size in inches (20, 26 or 29)
        #[arg(short, long, allow_negative_numbers = true)]
        wheel: i64,
    },
}

/// Execute a unit command
pub fn execute(command: UnitCommands, session: &mut Session, format: OutputFormat) -> CliResult<()> {
    match command {
        UnitCommands::Add { wheel } => {
            let unit = session.add_unit(wheel)?;
            session.save()?;

            if format == OutputFormat::Table {
                print_success(&format!("Registered unit {} ({})", unit.key, unit.wheel_size));
            }
            print_single(UnitRow::from(&unit), format)
        }
    }
}
