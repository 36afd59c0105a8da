//! Test helpers for writing court snapshots to temporary directories.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Value, json};
use tempfile::TempDir;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write fixture file");
}

/// A temporary directory holding a court snapshot.
#[derive(Debug)]
pub(super) struct Snapshot {
    _dir: TempDir,
    root: Utf8PathBuf,
    path: Utf8PathBuf,
}

impl Snapshot {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let path = root.join("courts.json");
        Self {
            _dir: dir,
            root,
            path,
        }
    }

    /// Snapshot containing [`sample_courts`].
    pub(super) fn with_sample_courts() -> Self {
        let snapshot = Self::new();
        snapshot.write(&sample_courts());
        snapshot
    }

    pub(super) fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn write(&self, courts: &Value) {
        let payload = serde_json::to_vec_pretty(courts).expect("serialise courts");
        write_utf8(&self.path, &payload);
    }
}

/// Three courts in the shape served by `/api/courts`.
pub(super) fn sample_courts() -> Value {
    json!([
        {
            "id": "venice",
            "name": "Venice Beach Courts",
            "address": "1800 Ocean Front Walk, Venice, CA",
            "latitude": 33.985,
            "longitude": -118.4695,
            "hours": "6:00 am - 10:00 pm",
            "phoneNumber": "(310) 555-0100",
            "rating": 4.5,
            "currentPlayers": 3,
            "averagePlayers": 12
        },
        {
            "id": 2,
            "name": "Downtown Courts",
            "address": "S Main St, Los Angeles, CA",
            "latitude": 34.0407,
            "longitude": -118.2468,
            "rating": "unrated",
            "currentPlayers": 30
        },
        {
            "id": "civic",
            "name": "Civic Center Courts",
            "address": "Larkin St, San Francisco, CA",
            "latitude": 37.7749,
            "longitude": -122.4194,
            "currentPlayers": 0
        }
    ])
}
