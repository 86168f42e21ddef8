//! Match and seat category definitions
//!
//! Field names double as the persisted JSON keys, so renaming a field is a
//! storage format change.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A seating category offered for a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketCategory {
    /// Category tier (1 is the best seats)
    pub quality: u32,

    /// Integer part of the displayed price
    pub price: u64,
}

impl TicketCategory {
    pub fn new(quality: u32, price: u64) -> Self {
        Self { quality, price }
    }
}

/// One scheduled match as listed on its ticketing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// 1-based slot number, stable across runs
    pub match_number: u32,

    pub host_team: String,
    pub opposing_team: String,

    /// Date label as displayed, e.g. "Monday, 21 November 2022"
    pub match_date: String,

    /// Kick-off time label as displayed, e.g. "13:00"
    pub match_time: String,

    pub stadium: String,

    /// Categories currently on sale, in page order
    pub available_categories: Vec<TicketCategory>,
}

impl MatchRecord {
    /// Returns true if at least one category is on sale
    pub fn is_available(&self) -> bool {
        !self.available_categories.is_empty()
    }

    /// Returns the set of quality tiers on sale, ignoring prices
    pub fn qualities(&self) -> HashSet<u32> {
        self.available_categories.iter().map(|c| c.quality).collect()
    }
}

/// All match records fetched in one run, ordered by slot
///
/// A batch is never modified once built; position encodes slot identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Batch {
    records: Vec<MatchRecord>,
}

impl Batch {
    /// Creates an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the records in slot order
    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MatchRecord> {
        self.records.iter()
    }

    /// Counts records with at least one category on sale
    pub fn available_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_available()).count()
    }
}

impl From<Vec<MatchRecord>> for Batch {
    fn from(records: Vec<MatchRecord>) -> Self {
        Self { records }
    }
}

impl FromIterator<MatchRecord> for Batch {
    fn from_iter<I: IntoIterator<Item = MatchRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Batch {
    type Item = &'a MatchRecord;
    type IntoIter = std::slice::Iter<'a, MatchRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
