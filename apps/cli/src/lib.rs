//! # Rodada CLI
//!
//! Command-line front end for the bicycle rental records.
//!
//! ## Module Organization
//! ```text
//! rodada_cli/
//! ├── lib.rs          ◄─── You are here (argument parsing, logging, dispatch)
//! ├── config.rs       ◄─── Data directory from env and flags
//! ├── session.rs      ◄─── Loaded store + database + clock
//! ├── commands/
//! │   ├── mod.rs      ◄─── Subcommand tree
//! │   ├── unit.rs     ◄─── unit add
//! │   ├── customer.rs ◄─── customer add
//! │   ├── loan.rs     ◄─── loan create / loan return
//! │   ├── report.rs   ◄─── list <report>, table rows
//! │   └── export.rs   ◄─── export csv / export xlsx
//! ├── shell.rs        ◄─── Interactive menu
//! ├── output.rs       ◄─── Tables, JSON, colored messages
//! └── error.rs        ◄─── CliError and exit codes
//! ```
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Initialize tracing (stderr, so reports on stdout stay clean)
//! 3. Resolve configuration: flags over `RODADA_*` over defaults
//! 4. Load the tables into a session
//! 5. Run the command; errors become `✗ message` and an exit status

pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod session;
pub mod shell;

use std::path::PathBuf;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::Commands;
use config::AppConfig;
use output::{print_error, OutputFormat};
use session::Session;

/// Rodada command line
#[derive(Debug, Parser)]
#[command(name = "rodada")]
#[command(about = "Rodada - bicycle rental records", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding the CSV tables [env: RODADA_DATA_DIR]
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Spreadsheet file name for Excel export [env: RODADA_WORKBOOK]
    #[arg(long, global = true)]
    pub workbook: Option<String>,

    /// Output format for reports
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Parses the process arguments, runs the command and returns the exit status.
pub fn run() -> i32 {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = AppConfig::from_env().with_overrides(cli.data_dir, cli.workbook);
    debug!(?config, "Resolved configuration");

    let mut session = Session::open(&config);

    match commands::execute(cli.command, &mut session, cli.output) {
        Ok(()) => 0,
        Err(err) => {
            print_error(&err.to_string());
            err.code().exit_code()
        }
    }
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG` wins when set
/// - Otherwise `warn`, or `debug` with `--verbose`
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .init();
}
