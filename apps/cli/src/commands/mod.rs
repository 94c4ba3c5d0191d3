//! # Commands Module
//!
//! One-shot subcommands of the `rodada` binary.
//!
//! ```text
//! rodada unit add      ─┐
//! rodada customer add   │  load ─► mutate ─► save ─► print
//! rodada loan create    │
//! rodada loan return   ─┘
//! rodada list <report>    load ─► print
//! rodada export <kind>    load ─► write
//! rodada shell            load ─► menu loop
//! ```

pub mod customer;
pub mod export;
pub mod loan;
pub mod report;
pub mod unit;

use clap::Subcommand;

use crate::error::CliResult;
use crate::output::OutputFormat;
use crate::session::Session;
use crate::shell;

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage bicycles
    Unit {
        #[command(subcommand)]
        command: unit::UnitCommands,
    },

    /// Manage customers
    Customer {
        #[command(subcommand)]
        command: customer::CustomerCommands,
    },

    /// Lend and receive bicycles
    Loan {
        #[command(subcommand)]
        command: loan::LoanCommands,
    },

    /// Print a report
    #[command(alias = "ls")]
    List {
        #[arg(value_enum)]
        report: report::Report,
    },

    /// Export the data
    Export {
        #[command(subcommand)]
        command: export::ExportCommands,
    },

    /// Interactive menu
    Shell,
}

/// Execute a command against an open session
pub fn execute(command: Commands, session: &mut Session, format: OutputFormat) -> CliResult<()> {
    match command {
        Commands::Unit { command } => unit::execute(command, session, format),
        Commands::Customer { command } => customer::execute(command, session, format),
        Commands::Loan { command } => loan::execute(command, session, format),
        Commands::List { report } => report::print_report(session.store(), report, format),
        Commands::Export { command } => export::execute(command, session),
        Commands::Shell => shell::run(session),
    }
}
