//! Storage module for persisting listing snapshots
//!
//! This module handles all database operations for the watcher, including:
//! - SQLite database initialization and schema management
//! - Batch encoding for persistence
//! - Reading the latest snapshot and appending new ones

mod encoding;
mod schema;
mod sqlite;
mod traits;

pub use encoding::{decode_batch, encode_batch};
pub use sqlite::SqliteSnapshotStore;
pub use traits::{SnapshotStore, StoreError, StoreResult};

use crate::config::StoreConfig;
use std::path::Path;
use std::time::Duration;

/// Opens the snapshot store described by the configuration
///
/// # Arguments
///
/// * `config` - The store configuration
///
/// # Returns
///
/// * `Ok(SqliteSnapshotStore)` - Successfully opened store
/// * `Err(StoreError)` - Failed to open the database
pub fn open_store(config: &StoreConfig) -> StoreResult<SqliteSnapshotStore> {
    SqliteSnapshotStore::new(
        Path::new(&config.database_path),
        Duration::from_millis(config.busy_timeout_ms),
    )
}
