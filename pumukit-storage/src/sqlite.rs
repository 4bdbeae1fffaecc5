//! SQLite-backed gateway.
//!
//! One table, one row per multimedia object: the JSON document plus its
//! version. Versions only ever move forward, one step per successful save.
//! Series and status are copied out of the document into their own columns
//! on every save so they can be queried.

use crate::error::{StorageError, StorageResult};
use crate::gateway::MultimediaObjectGateway;
use pumukit_model::{MultimediaObject, Status};
use pumukit_types::{MultimediaObjectId, SeriesId};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Multimedia object store backed by SQLite.
#[derive(Clone)]
pub struct SqliteObjectStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteObjectStore {
    /// Opens (or creates) a store at the given path.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        info!(path = %path.display(), "Opened multimedia object store");
        Self::with_connection(conn)
    }

    /// Opens an in-memory store (for testing).
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StorageResult<Self> {
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StorageResult<()> {
        let conn = self.conn.lock()?;
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS multimedia_objects (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                series_id TEXT,
                status INTEGER NOT NULL,
                doc TEXT NOT NULL,
                version INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_multimedia_objects_series
                ON multimedia_objects(series_id, status);
            ",
        )?;
        Ok(())
    }

    /// Number of stored objects.
    pub fn count(&self) -> StorageResult<usize> {
        let conn = self.conn.lock()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM multimedia_objects", [], |row| row.get(0))?;
        usize::try_from(n).map_err(|_| StorageError::InvalidData(format!("negative row count {n}")))
    }

    fn stored_version(conn: &Connection, id: &MultimediaObjectId) -> StorageResult<Option<u64>> {
        let version: Option<i64> = conn
            .query_row(
                "SELECT version FROM multimedia_objects WHERE id = ?1",
                params![id.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        version.map(to_version).transpose()
    }

    fn query_ids(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> StorageResult<Vec<MultimediaObjectId>> {
        let conn = self.conn.lock()?;
        let mut stmt = conn.prepare(sql)?;
        let raw = stmt
            .query_map(params, |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        raw.iter()
            .map(|s| {
                MultimediaObjectId::parse(s)
                    .map_err(|e| StorageError::InvalidData(format!("bad object id {s:?}: {e}")))
            })
            .collect()
    }
}

impl MultimediaObjectGateway for SqliteObjectStore {
    fn load(&self, id: &MultimediaObjectId) -> StorageResult<MultimediaObject> {
        let conn = self.conn.lock()?;
        let row: Option<(String, i64)> = conn
            .query_row(
                "SELECT doc, version FROM multimedia_objects WHERE id = ?1",
                params![id.to_string()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        let (doc, version) = row.ok_or(StorageError::NotFound(*id))?;

        let mut object: MultimediaObject = serde_json::from_str(&doc)?;
        if object.id != *id {
            return Err(StorageError::InvalidData(format!(
                "row {id} holds document for {}",
                object.id
            )));
        }
        object.version = to_version(version)?;
        Ok(object)
    }

    fn save(&self, object: &mut MultimediaObject) -> StorageResult<()> {
        let doc = serde_json::to_string(&*object)?;
        let id = object.id.to_string();
        let series_id = object.series_id.map(|s| s.to_string());
        let status = object.status.code();
        let expected = object.version;
        let next = expected + 1;

        let conn = self.conn.lock()?;
        let changed = if expected == 0 {
            conn.execute(
                "INSERT OR IGNORE INTO multimedia_objects (id, title, series_id, status, doc, version)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![id, object.title, series_id, status, doc, from_version(next)?],
            )?
        } else {
            conn.execute(
                "UPDATE multimedia_objects SET title = ?2, series_id = ?3, status = ?4, doc = ?5, version = ?6
                 WHERE id = ?1 AND version = ?7",
                params![
                    id,
                    object.title,
                    series_id,
                    status,
                    doc,
                    from_version(next)?,
                    from_version(expected)?
                ],
            )?
        };

        if changed == 0 {
            return match Self::stored_version(&conn, &object.id)? {
                Some(found) => Err(StorageError::Conflict {
                    id: object.id,
                    expected,
                    found,
                }),
                None => Err(StorageError::NotFound(object.id)),
            };
        }

        object.version = next;
        debug!(object_id = %object.id, version = next, "Saved multimedia object");
        Ok(())
    }

    fn delete(&self, id: &MultimediaObjectId) -> StorageResult<bool> {
        let conn = self.conn.lock()?;
        let changed = conn.execute(
            "DELETE FROM multimedia_objects WHERE id = ?1",
            params![id.to_string()],
        )?;
        if changed > 0 {
            debug!(object_id = %id, "Deleted multimedia object");
        }
        Ok(changed > 0)
    }

    fn list_ids(&self) -> StorageResult<Vec<MultimediaObjectId>> {
        self.query_ids("SELECT id FROM multimedia_objects ORDER BY id", [])
    }

    fn list_by_series(&self, series_id: &SeriesId) -> StorageResult<Vec<MultimediaObjectId>> {
        self.query_ids(
            "SELECT id FROM multimedia_objects WHERE series_id = ?1 ORDER BY rowid",
            params![series_id.to_string()],
        )
    }

    fn list_with_status(
        &self,
        series_id: &SeriesId,
        statuses: &[Status],
    ) -> StorageResult<Vec<MultimediaObjectId>> {
        if statuses.is_empty() {
            return Ok(Vec::new());
        }
        // Codes come from the enum, never from input.
        let codes: Vec<String> = statuses.iter().map(|s| s.code().to_string()).collect();
        let sql = format!(
            "SELECT id FROM multimedia_objects WHERE series_id = ?1 AND status IN ({}) ORDER BY rowid",
            codes.join(", ")
        );
        self.query_ids(&sql, params![series_id.to_string()])
    }
}

fn to_version(raw: i64) -> StorageResult<u64> {
    u64::try_from(raw).map_err(|_| StorageError::InvalidData(format!("negative version {raw}")))
}

fn from_version(version: u64) -> StorageResult<i64> {
    i64::try_from(version).map_err(|_| StorageError::InvalidData(format!("version overflow {version}")))
}
