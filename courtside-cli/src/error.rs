//! Error types emitted by the Courtside CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use courtside_core::{GeoPointError, PresentError};
use thiserror::Error;

/// Errors emitted by the Courtside CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// Installing the terminal logger failed.
    #[error("failed to initialise logging: {0}")]
    InitLogging(#[from] log::SetLoggerError),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Option name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// Only one half of the origin coordinate was supplied.
    #[error("{given} was set without {missing} (set --{missing} or {env})")]
    IncompleteOrigin {
        /// Coordinate option that was supplied.
        given: &'static str,
        /// Coordinate option that is missing.
        missing: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// The origin coordinate is out of range.
    #[error("invalid origin: {0}")]
    InvalidOrigin(#[source] GeoPointError),
    /// A coordinate passed to the `distance` command is out of range.
    #[error(transparent)]
    InvalidCoordinate(#[from] GeoPointError),
    /// The distance cap is negative or not finite.
    #[error("{field} must be a non-negative number, got {value}")]
    InvalidMaxDistance {
        /// Option name.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Option naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Opening the court snapshot failed.
    #[error("failed to open court records at {path:?}: {source}")]
    OpenRecords {
        /// Snapshot path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The court snapshot could not be decoded.
    #[error("failed to parse court records JSON at {path:?}: {source}")]
    ParseRecords {
        /// Snapshot path.
        path: Utf8PathBuf,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// A court in the snapshot has an invalid location.
    #[error("court {id} in {path:?} has an invalid location: {source}")]
    InvalidRecord {
        /// Snapshot path.
        path: Utf8PathBuf,
        /// Identifier of the offending court.
        id: String,
        /// Validation failure.
        #[source]
        source: GeoPointError,
    },
    /// A ranked court could not be shaped for display.
    #[error(transparent)]
    Present(#[from] PresentError),
    /// A timestamp passed to the `since` command is not RFC 3339.
    #[error("invalid timestamp '{value}': {source}")]
    InvalidTimestamp {
        /// Rejected input.
        value: String,
        /// Parser failure.
        #[source]
        source: chrono::ParseError,
    },
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
