use crate::error::StorageResult;
use pumukit_model::{MultimediaObject, Status};
use pumukit_types::{MultimediaObjectId, SeriesId};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Load/save contract for multimedia objects.
///
/// Implementations must honour `MultimediaObject::version`: `save` fails
/// with [`StorageError::Conflict`](crate::StorageError::Conflict) when the stored version differs from the
/// one the object was loaded with, and bumps the version on success.
/// An object with version 0 has never been saved and is inserted.
pub trait MultimediaObjectGateway {
    /// Loads an object with its current version.
    fn load(&self, id: &MultimediaObjectId) -> StorageResult<MultimediaObject>;

    /// Saves an object, advancing `object.version` on success.
    fn save(&self, object: &mut MultimediaObject) -> StorageResult<()>;

    /// Deletes an object and everything embedded in it. Returns true if it existed.
    fn delete(&self, id: &MultimediaObjectId) -> StorageResult<bool>;

    /// Identifiers of all stored objects.
    fn list_ids(&self) -> StorageResult<Vec<MultimediaObjectId>>;

    /// Objects of a series, in insertion order.
    fn list_by_series(&self, series_id: &SeriesId) -> StorageResult<Vec<MultimediaObjectId>>;

    /// Objects of a series whose status is one of `statuses`, in insertion
    /// order. An empty `statuses` matches nothing.
    fn list_with_status(
        &self,
        series_id: &SeriesId,
        statuses: &[Status],
    ) -> StorageResult<Vec<MultimediaObjectId>>;

    /// The series prototype, if one is stored.
    fn find_prototype(&self, series_id: &SeriesId) -> StorageResult<Option<MultimediaObjectId>> {
        Ok(self
            .list_with_status(series_id, &[Status::Prototype])?
            .into_iter()
            .next())
    }

    /// Every object of the series except its prototype.
    fn list_without_prototype(&self, series_id: &SeriesId) -> StorageResult<Vec<MultimediaObjectId>> {
        let statuses: Vec<Status> = Status::ALL
            .into_iter()
            .filter(|s| *s != Status::Prototype)
            .collect();
        self.list_with_status(series_id, &statuses)
    }
}

/// Configuration for the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database file.
    pub path: PathBuf,
    /// Attempts made by [`edit_object`] before giving up on conflicts.
    pub max_conflict_retries: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("pumukit.db"),
            max_conflict_retries: 3,
        }
    }
}

/// Runs one read-modify-write cycle against the gateway.
///
/// `edit` may run more than once: on a save conflict the object is loaded
/// again and the edit re-applied to the fresh copy, up to `max_attempts`
/// times in total. Any other error is returned unchanged, and so is the last
/// conflict once attempts run out.
pub fn edit_object<G, F, T>(
    gateway: &G,
    id: &MultimediaObjectId,
    max_attempts: u32,
    mut edit: F,
) -> StorageResult<T>
where
    G: MultimediaObjectGateway + ?Sized,
    F: FnMut(&mut MultimediaObject) -> StorageResult<T>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;
    loop {
        let mut object = gateway.load(id)?;
        let output = edit(&mut object)?;
        match gateway.save(&mut object) {
            Ok(()) => {
                debug!(object_id = %id, version = object.version, attempt, "Edited multimedia object");
                return Ok(output);
            }
            Err(e) if e.is_conflict() && attempt < max_attempts => {
                warn!(object_id = %id, attempt, "Save conflict, reloading: {}", e);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
