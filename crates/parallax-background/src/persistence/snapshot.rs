//! Snapshot serialization for background parameters

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::layers::LayerParams;

/// Snapshot of background parameters for persistence
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Version for migration support
    #[serde(default)]
    pub version: u32,
    /// Active layer count
    pub layer_count: i32,
    /// Sky layer, `-1` for none
    pub sky_layer: i32,
    /// Simulation time multiplier
    pub main_rate: f64,
    /// Liquid motion multiplier
    pub secondary_rate: f64,
    /// Every layer, index order
    pub layers: Vec<LayerParams>,
}

impl Snapshot {
    /// Current snapshot version
    pub const CURRENT_VERSION: u32 = 1;

    /// Check if snapshot needs migration
    pub fn needs_migration(&self) -> bool {
        self.version < Self::CURRENT_VERSION
    }

    /// Migrate snapshot to current version
    pub fn migrate(&mut self) {
        // Version 0 blobs carry the same fields, only the tag is missing
        self.version = Self::CURRENT_VERSION;
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::Serialize(e.to_string()))
    }

    /// Parse from JSON, migrating older versions
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let mut snapshot: Snapshot = serde_json::from_str(json)?;
        if snapshot.version > Self::CURRENT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
                supported: Self::CURRENT_VERSION,
            });
        }
        if snapshot.needs_migration() {
            log::warn!(
                "migrating background snapshot from version {} to {}",
                snapshot.version,
                Self::CURRENT_VERSION
            );
            snapshot.migrate();
        }
        Ok(snapshot)
    }
}

/// Errors that can occur while saving or loading a snapshot
#[derive(Clone, Debug, PartialEq)]
pub enum SnapshotError {
    /// Malformed JSON or missing fields
    Parse(String),
    /// Serialization failed
    Serialize(String),
    /// Snapshot written by a newer version
    UnsupportedVersion { found: u32, supported: u32 },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Parse(msg) => write!(f, "Snapshot parse error: {}", msg),
            SnapshotError::Serialize(msg) => write!(f, "Snapshot serialize error: {}", msg),
            SnapshotError::UnsupportedVersion { found, supported } => write!(
                f,
                "Unsupported snapshot version {} (supported up to {})",
                found, supported
            ),
        }
    }
}

impl std::error::Error for SnapshotError {}

impl From<serde_json::Error> for SnapshotError {
    fn from(e: serde_json::Error) -> Self {
        SnapshotError::Parse(e.to_string())
    }
}
