//! Whole-collection snapshots
//!
//! A snapshot is the full collection serialized as a JSON array. It always
//! replaces the previous value wholesale; there is no merging or diffing.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Error type for snapshot operations
#[derive(Debug)]
pub enum SnapshotError {
    Encode(String),
    Decode(String),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::Encode(msg) => write!(f, "Failed to encode snapshot: {}", msg),
            SnapshotError::Decode(msg) => write!(f, "Failed to decode snapshot: {}", msg),
        }
    }
}

impl std::error::Error for SnapshotError {}

/// Where a loaded collection came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOrigin {
    /// A stored snapshot was decoded
    Snapshot,
    /// No snapshot existed, the seed collection was used
    Seed,
    /// A snapshot existed but could not be decoded; the seed collection was used
    Recovered(String),
}

pub fn encode<T: Serialize>(records: &[T]) -> Result<String, SnapshotError> {
    serde_json::to_string_pretty(records).map_err(|e| SnapshotError::Encode(e.to_string()))
}

pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>, SnapshotError> {
    serde_json::from_str(raw).map_err(|e| SnapshotError::Decode(e.to_string()))
}

/// Pick the initial collection from an optional stored snapshot
///
/// A snapshot that fails to decode is a recoverable condition: the seed
/// collection is returned and the decode error is reported in the origin.
pub fn resolve<T, F>(raw: Option<&str>, seed: F) -> (Vec<T>, LoadOrigin)
where
    T: DeserializeOwned,
    F: FnOnce() -> Vec<T>,
{
    match raw {
        None => (seed(), LoadOrigin::Seed),
        Some(raw) => match decode(raw) {
            Ok(records) => (records, LoadOrigin::Snapshot),
            Err(e) => (seed(), LoadOrigin::Recovered(e.to_string())),
        },
    }
}
