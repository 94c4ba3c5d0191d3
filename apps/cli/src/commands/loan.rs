//! Loan commands

use clap::Subcommand;
use rodada_core::validation::{format_date, parse_loan_days};
use rodada_core::{CoreError, Folio, Key, LoanRequest};

use crate::commands::report::LoanRow;
use crate::error::CliResult;
use crate::output::{print_single, print_success, OutputFormat};
use crate::session::Session;

/// Loan subcommands
#[derive(Debug, Subcommand)]
pub enum LoanCommands {
    /// Lend a unit to a customer
    Create {
        /// Customer key
        #[arg(short, long)]
        customer: Key,

        /// Unit key
        #[arg(short, long)]
        unit: Key,

        /// Loan date (mm-dd-yyyy); defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Loan length in days (1 to 14)
        #[arg(long, allow_hyphen_values = true)]
        days: String,
    },

    /// Record the return of a unit
    Return {
        /// Folio of the open loan
        #[arg(short, long)]
        folio: Folio,

        /// Actual return date (mm-dd-yyyy); defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
}

/// Execute a loan command
pub fn execute(command: LoanCommands, session: &mut Session, format: OutputFormat) -> CliResult<()> {
    match command {
        LoanCommands::Create {
            customer,
            unit,
            date,
            days,
        } => {
            // Range is checked by the engine, after customer, unit and date.
            let days = parse_loan_days(&days).map_err(CoreError::from)?;
            let mut request = LoanRequest::new(customer, unit, days);
            if let Some(date) = date {
                request = request.on(date);
            }

            let loan = session.create_loan(request)?;
            session.save()?;

            if format == OutputFormat::Table {
                print_success(&format!(
                    "Loan {} created, due {}",
                    loan.folio,
                    format_date(loan.due_date)
                ));
            }
            print_single(LoanRow::from(&loan), format)
        }

        LoanCommands::Return { folio, date } => {
            let loan = session.record_return(folio, date.as_deref())?;
            session.save()?;

            if format == OutputFormat::Table {
                print_success(&format!("Loan {} returned", loan.folio));
            }
            print_single(LoanRow::from(&loan), format)
        }
    }
}
