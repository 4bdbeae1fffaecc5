//! Core identifier types for Pumukit.
//!
//! This crate defines the opaque identifiers used throughout the media core:
//! - Multimedia object identifiers (the parent document)
//! - Embedded item identifiers (pics, materials, links, tracks)
//! - Series and person identifiers referenced from a multimedia object
//! - Identifier generators, so callers decide how ids are minted
//!
//! Identifiers are only ever compared for equality by the ordering logic;
//! they carry no positional meaning.

mod generator;
mod ids;

pub use generator::{IdGenerator, SequentialGenerator, UuidV7Generator};
pub use ids::{EmbeddedId, MultimediaObjectId, PersonId, SeriesId};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),
}
