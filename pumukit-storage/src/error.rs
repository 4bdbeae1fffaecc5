//! Error types for the storage layer.

use pumukit_model::ModelError;
use pumukit_types::MultimediaObjectId;
use std::sync::{MutexGuard, PoisonError};
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Object not found.
    #[error("multimedia object not found: {0}")]
    NotFound(MultimediaObjectId),

    /// Someone else saved the object since it was loaded.
    #[error("save conflict on {id}: loaded version {expected}, stored version {found}")]
    Conflict {
        id: MultimediaObjectId,
        expected: u64,
        found: u64,
    },

    /// An edit applied during a read-modify-write cycle failed.
    #[error("edit rejected: {0}")]
    Model(#[from] ModelError),

    /// Invalid data in the store.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// The connection mutex was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    Lock,
}

impl StorageError {
    /// True for optimistic-concurrency conflicts, which are worth retrying.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

impl From<PoisonError<MutexGuard<'_, rusqlite::Connection>>> for StorageError {
    fn from(_: PoisonError<MutexGuard<'_, rusqlite::Connection>>) -> Self {
        Self::Lock
    }
}
