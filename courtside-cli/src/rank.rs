//! Rank command implementation for the Courtside CLI.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use courtside_core::{
    DisplayRecord, DistanceUnit, FallbackOrder, GeoPoint, OccupancyColorPolicy, Presenter, Query,
    SearchField, rank,
};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::records::load_records;
use crate::{
    ARG_ALPHABETICAL, ARG_FIELD, ARG_LATITUDE, ARG_LIMIT, ARG_LONGITUDE, ARG_MAX_DISTANCE,
    ARG_RECORDS, ARG_SEARCH, ARG_SKIP_INVALID_RECORDS, ARG_UNIT, CliError, ENV_LATITUDE,
    ENV_LONGITUDE, ENV_RECORDS, write_json,
};

/// CLI arguments for the `rank` subcommand.
///
/// Unset flags and empty lists are left out when serialised so that values
/// from configuration files and the environment survive the CLI layer.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "rank",
    long_about = "Rank courts from a JSON snapshot of the backend's court \
                 list. Courts are filtered by search text, ordered by distance \
                 from the origin when one is given, and printed as display \
                 records. Settings can come from CLI flags, configuration \
                 files, or environment variables.",
    about = "Rank courts around an optional origin"
)]
#[ortho_config(prefix = "COURTSIDE")]
pub(crate) struct RankArgs {
    /// Path to a JSON array of court records.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) records: Option<Utf8PathBuf>,
    /// Origin latitude in degrees.
    #[arg(long = ARG_LATITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) latitude: Option<f64>,
    /// Origin longitude in degrees.
    #[arg(long = ARG_LONGITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) longitude: Option<f64>,
    /// Keep courts whose name or address contains this text.
    #[arg(long = ARG_SEARCH, value_name = "text")]
    #[serde(default)]
    pub(crate) search: Option<String>,
    /// Field to search (`name`, `address`, `attr:<key>`); repeatable.
    #[arg(long = ARG_FIELD, value_name = "field")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) fields: Vec<SearchField>,
    /// Print at most this many courts.
    #[arg(long = ARG_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Drop courts farther than this from the origin.
    #[arg(long = ARG_MAX_DISTANCE, value_name = "distance")]
    #[serde(default)]
    pub(crate) max_distance: Option<f64>,
    /// Distance unit (`mi` or `km`).
    #[arg(long = ARG_UNIT, value_name = "unit")]
    #[serde(default)]
    pub(crate) unit: Option<DistanceUnit>,
    /// Sort by name when no origin is given.
    #[arg(long = ARG_ALPHABETICAL)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) alphabetical: bool,
    /// Skip malformed courts instead of failing.
    #[arg(long = ARG_SKIP_INVALID_RECORDS)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) skip_invalid_records: bool,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RankConfig {
    /// Path to the court snapshot.
    pub(crate) records: Utf8PathBuf,
    /// Query assembled from the ranking options.
    pub(crate) query: Query,
    /// Whether malformed courts are skipped.
    pub(crate) skip_invalid_records: bool,
}

impl RankConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.records, ARG_RECORDS)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match crate::fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let records = args.records.ok_or(CliError::MissingArgument {
            field: ARG_RECORDS,
            env: ENV_RECORDS,
        })?;
        let origin = resolve_origin(args.latitude, args.longitude)?;
        if let Some(value) = args.max_distance
            && !(value.is_finite() && value >= 0.0)
        {
            return Err(CliError::InvalidMaxDistance {
                field: ARG_MAX_DISTANCE,
                value,
            });
        }

        let mut query = Query::new()
            .with_optional_origin(origin)
            .with_unit(args.unit.unwrap_or_default());
        if let Some(search) = args.search {
            query = query.with_search(search);
        }
        if !args.fields.is_empty() {
            query = query.with_fields(args.fields);
        }
        if let Some(limit) = args.limit {
            query = query.with_max_results(limit);
        }
        if let Some(max_distance) = args.max_distance {
            query = query.with_max_distance(max_distance);
        }
        if args.alphabetical {
            query = query.with_fallback_order(FallbackOrder::Alphabetical);
        }

        Ok(Self {
            records,
            query,
            skip_invalid_records: args.skip_invalid_records,
        })
    }
}

fn resolve_origin(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<Option<GeoPoint>, CliError> {
    match (latitude, longitude) {
        (Some(lat), Some(lon)) => GeoPoint::new(lat, lon)
            .map(Some)
            .map_err(CliError::InvalidOrigin),
        (None, None) => Ok(None),
        (Some(_), None) => Err(CliError::IncompleteOrigin {
            given: ARG_LATITUDE,
            missing: ARG_LONGITUDE,
            env: ENV_LONGITUDE,
        }),
        (None, Some(_)) => Err(CliError::IncompleteOrigin {
            given: ARG_LONGITUDE,
            missing: ARG_LATITUDE,
            env: ENV_LATITUDE,
        }),
    }
}

pub(crate) fn run_rank_with(args: RankArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let display = execute_rank(&config)?;
    write_json(writer, &display)
}

/// Load, rank and present the courts described by `config`.
pub(crate) fn execute_rank(config: &RankConfig) -> Result<Vec<DisplayRecord>, CliError> {
    let courts = load_records(&config.records, config.skip_invalid_records)?;
    let ranked = rank(&courts, &config.query);
    let presenter = Presenter::new(OccupancyColorPolicy::default())
        .with_skip_invalid_records(config.skip_invalid_records);
    Ok(presenter.present_all(&ranked)?)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RankConfig, CliError> {
    let merged = RankArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RankConfig::try_from(merged)
}
