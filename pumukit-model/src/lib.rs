//! Multimedia object model for Pumukit.
//!
//! Defines the document every other subsystem works on:
//! - [`MultimediaObject`]: the parent document owning the embedded lists
//! - [`Pic`], [`Material`], [`Link`], [`Track`]: the four embedded kinds,
//!   each kept in a [`pumukit_collection::OrderedCollection`]
//! - [`EmbeddedRole`], [`EmbeddedPerson`]: people credited in the object, by role
//! - [`Status`]: publication status, queried per series
//! - [`EmbeddedBroadcast`]: who may watch the object
//! - [`EmbeddedSegment`]: searchable transcript segments imported from Opencast
//! - [`SchemaConfig`]: default pictures and role codes
//!
//! Nothing in this crate persists. Mutate a loaded object, then hand it back
//! to a gateway to save.

mod broadcast;
mod config;
mod error;
mod media;
mod object;
mod person;
mod segment;
mod status;

pub use broadcast::{BroadcastType, EmbeddedBroadcast};
pub use config::SchemaConfig;
pub use error::{ModelError, ModelResult};
pub use media::{EmbeddedKind, Link, Material, Pic, Tagged, Track};
pub use object::{Links, Materials, MultimediaObject, Pics, Roles, Tracks};
pub use person::{EmbeddedPerson, EmbeddedRole, Role};
pub use segment::{EmbeddedSegment, segments_from_media_package};
pub use status::Status;
