//! Snapshot persistence for the opportunity board.
//!
//! A [`Store`] reads and replaces one named entry in a [`SnapshotBackend`],
//! the key-value collaborator standing in for browser local storage.

use std::{io, path::PathBuf};

use shared::BoardError;
use thiserror::Error;

mod backend;
mod store;

pub use backend::{FileBackend, MemoryBackend, SnapshotBackend};
pub use store::{Store, DEFAULT_STORAGE_KEY};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage key '{0}' is not usable as an entry name")]
    InvalidKey(String),
    #[error("i/o error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("write to '{key}' rejected: {reason}")]
    WriteRejected { key: String, reason: String },
    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("snapshot under '{key}' is corrupt: {reason}")]
    Corrupt { key: String, reason: String },
}

impl StoreError {
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt { .. })
    }
}

impl From<StoreError> for BoardError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Corrupt { reason, .. } => BoardError::CorruptState(reason),
            other => BoardError::Persistence(other.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
