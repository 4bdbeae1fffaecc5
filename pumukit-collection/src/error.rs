//! Error types for ordered collections.

use thiserror::Error;

/// Result type for collection operations.
pub type CollectionResult<T> = Result<T, CollectionError>;

/// Errors that can occur when mutating a collection.
///
/// Lookups and the reordering operations never fail; only insertion can
/// violate the identity invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// An item with this identifier is already in the collection.
    #[error("duplicate identifier: {id}")]
    DuplicateIdentifier { id: String },
}
