//! Relative-time command implementation for the Courtside CLI.

use std::io::Write;

use chrono::{DateTime, Utc};
use clap::Parser;
use courtside_core::format_relative;

use crate::{CliError, write_line};

/// CLI arguments for the `since` subcommand.
#[derive(Debug, Clone, Parser)]
#[command(about = "Describe how long ago an RFC 3339 timestamp was")]
pub(crate) struct SinceArgs {
    /// Timestamp such as `2024-03-10T11:55:00Z`.
    #[arg(value_name = "timestamp")]
    pub(crate) timestamp: String,
}

pub(crate) fn run_since_with(
    args: &SinceArgs,
    now: DateTime<Utc>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let then = DateTime::parse_from_rfc3339(args.timestamp.trim())
        .map_err(|source| CliError::InvalidTimestamp {
            value: args.timestamp.clone(),
            source,
        })?
        .with_timezone(&Utc);
    write_line(writer, &format_relative(then, now))
}
