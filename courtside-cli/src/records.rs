//! Decoding court snapshots served by the backend.

use std::fmt;
use std::io::BufReader;

use camino::Utf8Path;
use courtside_core::{
    ATTR_HOURS, ATTR_OCCUPANCY, ATTR_PHONE, ATTR_RATING, GeoPoint, GeoPointError, PointOfInterest,
};
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

use crate::{CliError, fs::open_utf8_file};

/// Attribute key holding the typical occupancy of a court.
pub(crate) const ATTR_AVERAGE_OCCUPANCY: &str = "average_occupancy";

/// Court identifiers arrive as strings or integers depending on the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(crate) enum CourtId {
    Number(u64),
    Text(String),
}

impl fmt::Display for CourtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// One court as returned by the `/api/courts` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CourtRecord {
    pub(crate) id: CourtId,
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) address: String,
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
    #[serde(default)]
    pub(crate) hours: Option<String>,
    #[serde(default)]
    pub(crate) phone_number: Option<String>,
    #[serde(default)]
    pub(crate) rating: Option<Value>,
    #[serde(default)]
    pub(crate) current_players: Option<Value>,
    #[serde(default)]
    pub(crate) average_players: Option<Value>,
}

impl TryFrom<CourtRecord> for PointOfInterest {
    type Error = GeoPointError;

    fn try_from(record: CourtRecord) -> Result<Self, Self::Error> {
        let location = GeoPoint::new(record.latitude, record.longitude)?;
        let mut poi =
            Self::new(record.id.to_string(), record.name, record.address, location);
        let optional = [
            (ATTR_HOURS, record.hours.map(Value::String)),
            (ATTR_PHONE, record.phone_number.map(Value::String)),
            (ATTR_RATING, record.rating),
            (ATTR_OCCUPANCY, record.current_players),
            (ATTR_AVERAGE_OCCUPANCY, record.average_players),
        ];
        for (key, value) in optional {
            if let Some(text) = value.as_ref().and_then(attribute_text) {
                poi.attributes.insert(key.to_owned(), text);
            }
        }
        Ok(poi)
    }
}

/// Flatten a JSON scalar into attribute text; `null` counts as absent.
///
/// Values are kept verbatim so that malformed occupancy counts surface when
/// the record is presented rather than failing the whole snapshot.
fn attribute_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Load every court in the snapshot at `path`.
///
/// Courts with invalid coordinates are skipped with a warning when
/// `skip_invalid_records` is set; otherwise the first one aborts the load.
pub(crate) fn load_records(
    path: &Utf8Path,
    skip_invalid_records: bool,
) -> Result<Vec<PointOfInterest>, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenRecords {
        path: path.to_path_buf(),
        source,
    })?;
    let courts: Vec<CourtRecord> =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            CliError::ParseRecords {
                path: path.to_path_buf(),
                source,
            }
        })?;
    into_points(path, courts, skip_invalid_records)
}

pub(crate) fn into_points(
    path: &Utf8Path,
    courts: Vec<CourtRecord>,
    skip_invalid_records: bool,
) -> Result<Vec<PointOfInterest>, CliError> {
    let total = courts.len();
    let mut records = Vec::with_capacity(total);
    for court in courts {
        let id = court.id.to_string();
        match PointOfInterest::try_from(court) {
            Ok(poi) => records.push(poi),
            Err(source) if skip_invalid_records => {
                warn!("Skipping court {id} in {path}: {source}");
            }
            Err(source) => {
                return Err(CliError::InvalidRecord {
                    path: path.to_path_buf(),
                    id,
                    source,
                });
            }
        }
    }
    debug!("Loaded {} of {total} courts from {path}", records.len());
    Ok(records)
}
