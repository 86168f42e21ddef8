//! Storage traits and error types
//!
//! This module defines the trait interface for snapshot store backends and
//! associated error types.

use crate::model::Snapshot;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid stored timestamp: {0}")]
    InvalidTimestamp(i64),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Trait for snapshot store implementations
///
/// A store keeps timestamped batches and hands back the most recent one.
pub trait SnapshotStore {
    /// Returns the snapshot with the greatest timestamp
    ///
    /// When nothing has been stored yet this is [`Snapshot::empty`], an empty
    /// batch at the Unix epoch.
    fn latest(&self) -> StoreResult<Snapshot>;

    /// Persists a snapshot
    ///
    /// A snapshot with the same timestamp as an existing one replaces it.
    fn put(&mut self, snapshot: &Snapshot) -> StoreResult<()>;
}
