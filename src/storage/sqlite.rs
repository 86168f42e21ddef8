//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the SnapshotStore
//! trait. Timestamps are stored as integer microseconds since the Unix epoch;
//! the conversion happens here and nowhere else.

use crate::model::Snapshot;
use crate::storage::encoding::{decode_batch, encode_batch};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{SnapshotStore, StoreError, StoreResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::Duration;

/// SQLite snapshot store
pub struct SqliteSnapshotStore {
    conn: Connection,
}

impl SqliteSnapshotStore {
    /// Opens or creates the snapshot database at `path`
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    /// * `busy_timeout` - How long a call waits on a locked database
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteSnapshotStore)` - Successfully opened/created database
    /// * `Err(StoreError)` - Failed to open database
    pub fn new(path: &Path, busy_timeout: Duration) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(busy_timeout)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
        ",
        )?;

        initialize_schema(&conn)?;

        tracing::debug!("Opened snapshot store at {}", path.display());
        Ok(Self { conn })
    }

    /// Creates an in-memory database
    pub fn new_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Number of stored snapshots
    pub fn count(&self) -> StoreResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM snapshots", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

impl SnapshotStore for SqliteSnapshotStore {
    fn latest(&self) -> StoreResult<Snapshot> {
        let row: Option<(i64, String)> = self
            .conn
            .query_row(
                "SELECT timestamp, data FROM snapshots ORDER BY timestamp DESC LIMIT 1",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((micros, data)) = row else {
            return Ok(Snapshot::empty());
        };

        let timestamp = DateTime::<Utc>::from_timestamp_micros(micros)
            .ok_or(StoreError::InvalidTimestamp(micros))?;
        let batch = decode_batch(&data)?;

        Ok(Snapshot::new(timestamp, batch))
    }

    fn put(&mut self, snapshot: &Snapshot) -> StoreResult<()> {
        let data = encode_batch(&snapshot.batch)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO snapshots (timestamp, data) VALUES (?1, ?2)",
            params![snapshot.timestamp.timestamp_micros(), data],
        )?;
        Ok(())
    }
}
