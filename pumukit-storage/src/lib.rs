//! Persistence gateway for Pumukit multimedia objects.
//!
//! The model crate never saves anything on its own; this crate provides the
//! explicit load/save contract and a SQLite implementation of it.
//!
//! # Architecture
//!
//! - Objects are stored whole, as JSON documents, one row per object
//! - Every row carries a version; `save` only succeeds if the version the
//!   caller loaded is still the stored one (optimistic concurrency)
//! - [`edit_object`] wraps load / mutate / save and retries on conflict

mod error;
mod gateway;
mod sqlite;

pub use error::{StorageError, StorageResult};
pub use gateway::{MultimediaObjectGateway, StorageConfig, edit_object};
pub use sqlite::SqliteObjectStore;
