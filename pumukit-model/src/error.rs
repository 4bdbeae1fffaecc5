//! Error types for the model crate.

use pumukit_collection::CollectionError;
use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while building or editing documents.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Embedded collection invariant violated.
    #[error(transparent)]
    Collection(#[from] CollectionError),

    /// A media-package segment could not be read.
    #[error("invalid segment: {0}")]
    InvalidSegment(String),

    /// Unknown embedded kind name.
    #[error("unknown embedded kind: {0}")]
    UnknownKind(String),

    /// Unknown publication status name.
    #[error("unknown status: {0}")]
    UnknownStatus(String),

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    /// Configuration could not be parsed.
    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),
}
