//! Distance command implementation for the Courtside CLI.

use std::io::Write;

use clap::Parser;
use courtside_core::{DistanceUnit, GeoPoint, distance_in};

use crate::{ARG_UNIT, CliError, write_line};

/// CLI arguments for the `distance` subcommand.
#[derive(Debug, Clone, Parser)]
#[command(about = "Measure the great-circle distance between two points")]
pub(crate) struct DistanceArgs {
    /// Latitude of the first point in degrees.
    #[arg(value_name = "from-lat", allow_negative_numbers = true)]
    pub(crate) from_latitude: f64,
    /// Longitude of the first point in degrees.
    #[arg(value_name = "from-lon", allow_negative_numbers = true)]
    pub(crate) from_longitude: f64,
    /// Latitude of the second point in degrees.
    #[arg(value_name = "to-lat", allow_negative_numbers = true)]
    pub(crate) to_latitude: f64,
    /// Longitude of the second point in degrees.
    #[arg(value_name = "to-lon", allow_negative_numbers = true)]
    pub(crate) to_longitude: f64,
    /// Distance unit (`mi` or `km`).
    #[arg(long = ARG_UNIT, value_name = "unit", default_value_t = DistanceUnit::Miles)]
    pub(crate) unit: DistanceUnit,
}

pub(crate) fn run_distance_with(
    args: &DistanceArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let from = GeoPoint::new(args.from_latitude, args.from_longitude)?;
    let to = GeoPoint::new(args.to_latitude, args.to_longitude)?;
    write_line(writer, &distance_in(from, to, args.unit).to_string())
}
