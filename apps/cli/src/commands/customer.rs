//! Customer commands

use clap::Subcommand;

use crate::commands::report::CustomerRow;
use crate::error::CliResult;
use crate::output::{print_single, print_success, OutputFormat};
use crate::session::Session;

/// Customer subcommands
#[derive(Debug, Subcommand)]
pub enum CustomerCommands {
    /// Register a customer
    Add {
        /// Last names
        #[arg(short, long)]
        last_name: String,

        /// First names
        #[arg(short, long)]
        first_name: String,

        /// Ten-digit phone number
        #[arg(short, long)]
        phone: String,
    },
}

/// Execute a customer command
pub fn execute(
    command: CustomerCommands,
    session: &mut Session,
    format: OutputFormat,
) -> CliResult<()> {
    match command {
        CustomerCommands::Add {
            last_name,
            first_name,
            phone,
        } => {
            let customer = session.add_customer(&last_name, &first_name, &phone)?;
            session.save()?;

            if format == OutputFormat::Table {
                print_success(&format!(
                    "Registered customer {}: {}",
                    customer.key,
                    customer.full_name()
                ));
            }
            print_single(CustomerRow::from(&customer), format)
        }
    }
}
