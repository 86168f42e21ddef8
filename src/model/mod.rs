//! Data model for match listings and stored snapshots
//!
//! A [`Batch`] holds one [`MatchRecord`] per slot in slot order. A
//! [`Snapshot`] pairs a batch with the time it was taken.

mod match_record;
mod snapshot;

pub use match_record::{Batch, MatchRecord, TicketCategory};
pub use snapshot::Snapshot;

#[cfg(test)]
pub(crate) mod strategies;
