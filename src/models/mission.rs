//! Mission log data structures.

use std::path::PathBuf;

use serde::ser::{Serialize, Serializer};

/// A local log file the server has not recorded yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMission {
    /// Integer timestamp parsed from the file name
    pub timestamp: i64,

    /// Full path to the log file
    pub path: PathBuf,
}

/// One entry of the `load_mission` batch.
///
/// Serialized as a two-element JSON array `[label, log]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionUpload {
    /// Timestamp label exactly as it appears in the file name
    pub label: String,

    /// Decoded log text without byte-order mark
    pub log: String,
}

impl Serialize for MissionUpload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.label, &self.log).serialize(serializer)
    }
}
