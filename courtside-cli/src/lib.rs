//! Command-line interface for ranking courts from a JSON snapshot.
//!
//! `courtside rank` loads the courts served by the backend, ranks them around
//! an optional origin and prints display records as JSON. `courtside
//! distance` and `courtside since` expose the distance and relative-time
//! helpers on their own.
#![forbid(unsafe_code)]

mod distance;
mod error;
mod fs;
mod rank;
mod records;
mod since;

use std::io::Write;

use clap::{Parser, Subcommand};
use serde::Serialize;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

pub use error::CliError;

use distance::{DistanceArgs, run_distance_with};
use rank::{RankArgs, run_rank_with};
use since::{SinceArgs, run_since_with};

pub(crate) const ARG_RECORDS: &str = "records";
pub(crate) const ARG_LATITUDE: &str = "latitude";
pub(crate) const ARG_LONGITUDE: &str = "longitude";
pub(crate) const ARG_SEARCH: &str = "search";
pub(crate) const ARG_FIELD: &str = "field";
pub(crate) const ARG_LIMIT: &str = "limit";
pub(crate) const ARG_MAX_DISTANCE: &str = "max-distance";
pub(crate) const ARG_UNIT: &str = "unit";
pub(crate) const ARG_ALPHABETICAL: &str = "alphabetical";
pub(crate) const ARG_SKIP_INVALID_RECORDS: &str = "skip-invalid-records";
pub(crate) const ENV_RECORDS: &str = "COURTSIDE_CMDS_RANK_RECORDS";
pub(crate) const ENV_LATITUDE: &str = "COURTSIDE_CMDS_RANK_LATITUDE";
pub(crate) const ENV_LONGITUDE: &str = "COURTSIDE_CMDS_RANK_LONGITUDE";

/// Run the Courtside CLI with the current process arguments and environment.
///
/// # Errors
/// Returns a [`CliError`] when arguments, configuration or input files are
/// invalid, or when output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = match parse_cli(std::env::args_os())? {
        Invocation::Run(cli) => cli,
        Invocation::Informational(message) => {
            return message.print().map_err(CliError::WriteOutput);
        }
    };
    init_logging(cli.verbose)?;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Rank(args) => run_rank_with(args, &mut stdout),
        Command::Distance(args) => run_distance_with(&args, &mut stdout),
        Command::Since(args) => run_since_with(&args, chrono::Utc::now(), &mut stdout),
    }
}

/// Outcome of parsing the command line.
#[derive(Debug)]
enum Invocation {
    /// A command to execute.
    Run(Cli),
    /// Help or version text for stdout; not a failure.
    Informational(clap::Error),
}

fn parse_cli<I, T>(args: I) -> Result<Invocation, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(Invocation::Run(cli)),
        Err(err) if err.use_stderr() => Err(err.into()),
        Err(err) => Ok(Invocation::Informational(err)),
    }
}

fn init_logging(verbose: bool) -> Result<(), CliError> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;
    Ok(())
}

#[derive(Debug, Parser)]
#[command(
    name = "courtside",
    about = "Find nearby courts and how busy they are",
    version
)]
struct Cli {
    /// Log ranking details to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank courts from a JSON snapshot and print display records.
    Rank(RankArgs),
    /// Print the great-circle distance between two coordinates.
    Distance(DistanceArgs),
    /// Print how long ago a timestamp was.
    Since(SinceArgs),
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize + ?Sized>(
    writer: &mut dyn Write,
    value: &T,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    write_line(writer, &payload)
}

/// Write `line` followed by a newline.
pub(crate) fn write_line(writer: &mut dyn Write, line: &str) -> Result<(), CliError> {
    writer
        .write_all(line.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
