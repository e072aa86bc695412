//! Splitbill CLI
//!
//! Reads an exported snapshot and reports who owes what, per bill or per group.

mod render;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use splitbill_core::{BillSummary, GroupSummary, Snapshot};
use splitbill_shared::{AppConfig, AppError, types::BillId};

/// Splits shared bills from a splitbill snapshot.
#[derive(Debug, Parser)]
#[command(name = "splitbill", version, about, long_about = None)]
struct Cli {
    /// Snapshot file to read (defaults to `snapshot.path` from the config)
    #[arg(short, long, global = true)]
    snapshot: Option<PathBuf>,

    /// Print JSON instead of a text report
    #[arg(long, global = true)]
    json: bool,

    /// Print amounts unrounded
    #[arg(long, global = true)]
    exact: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show how one bill is split
    Bill {
        /// Bill ID
        id: BillId,
    },
    /// Show what everyone owes across a group
    Group {
        /// Group ID or name
        group: String,
    },
    /// Validate the snapshot and print counts
    Check,
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(err.exit_code());
        }
    };

    init_tracing(&config, cli.verbose);

    match run(&cli, &config) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(code = err.downcast_ref::<AppError>().map(AppError::error_code), "{err:#}");
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn init_tracing(config: &AppConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("splitbill=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log.filter.as_str().into())
    };

    // Logs go to stderr so stdout stays parseable with --json
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: &Cli, config: &AppConfig) -> anyhow::Result<String> {
    let path = cli
        .snapshot
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.snapshot.path));
    let snapshot = load_snapshot(&path)?;

    let decimal_places = config.display.rounding_places();
    let currency = config.display.currency;

    let output = match &cli.command {
        Command::Bill { id } => {
            let (group, bill) = snapshot
                .find_bill(id)
                .ok_or_else(|| AppError::NotFound(format!("bill {id}")))?;
            let mut summary = BillSummary::build(bill, group);
            if !cli.exact {
                summary = summary.rounded(decimal_places);
            }

            if cli.json {
                to_json(&summary)?
            } else {
                render::bill(&summary, bill.bill_type, currency)
            }
        }
        Command::Group { group: key } => {
            let group = snapshot
                .find_group(key)
                .ok_or_else(|| AppError::NotFound(format!("group {key}")))?;
            let mut summary = GroupSummary::build(group);
            if !cli.exact {
                summary = summary.rounded(decimal_places);
            }

            if cli.json {
                to_json(&summary)?
            } else {
                render::group(&summary, &group.name, currency)
            }
        }
        Command::Check => format!(
            "ok: {} groups, {} bills",
            snapshot.groups.len(),
            snapshot.bill_count()
        ),
    };

    Ok(output)
}

fn load_snapshot(path: &Path) -> anyhow::Result<Snapshot> {
    debug!(path = %path.display(), "reading snapshot");

    let json = std::fs::read_to_string(path)
        .map_err(|err| AppError::NotFound(format!("snapshot {}: {err}", path.display())))?;
    let snapshot = Snapshot::from_json(&json).map_err(AppError::from)?;

    Ok(snapshot)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .map_err(|err| AppError::Internal(format!("failed to serialize report: {err}")))
}

/// Maps a failure to its process exit code; unexpected errors exit with 1.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<AppError>().map_or(1, AppError::exit_code)
}
