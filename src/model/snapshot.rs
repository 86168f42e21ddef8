//! Snapshot of the last known listing state

use crate::model::Batch;
use chrono::{DateTime, Duration, Utc};

/// A batch together with the time it was taken
///
/// An empty store is represented by a snapshot at the Unix epoch holding an
/// empty batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub timestamp: DateTime<Utc>,
    pub batch: Batch,
}

impl Snapshot {
    pub fn new(timestamp: DateTime<Utc>, batch: Batch) -> Self {
        Self { timestamp, batch }
    }

    /// The snapshot returned when nothing has been stored yet
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if this is the placeholder for an empty store
    pub fn is_empty(&self) -> bool {
        self.timestamp == DateTime::<Utc>::default() && self.batch.is_empty()
    }

    /// Returns true if the snapshot was taken more than `threshold` before `now`
    ///
    /// A threshold reaching past the representable range is never exceeded.
    pub fn is_stale(&self, now: DateTime<Utc>, threshold: Duration) -> bool {
        match now.checked_sub_signed(threshold) {
            Some(cutoff) => self.timestamp < cutoff,
            None => false,
        }
    }

    /// Picks the timestamp for the snapshot that supersedes this one
    ///
    /// Timestamps are kept at microsecond precision and always move forward,
    /// even if the clock went backwards between runs.
    pub fn next_timestamp(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let micros = now
            .timestamp_micros()
            .max(self.timestamp.timestamp_micros() + 1);
        DateTime::from_timestamp_micros(micros).unwrap_or(now)
    }
}
