//! Change detection between two batches

use crate::model::{Batch, MatchRecord};

/// Returns the records of `current` that gained availability since `previous`
///
/// Records are paired by position, the shorter batch padded with absent
/// entries:
///
/// | previous | current | included |
/// |----------|---------|----------|
/// | absent | available | yes |
/// | absent | unavailable | no |
/// | present | has a quality tier `previous` lacks | yes |
/// | present | no new tier | no |
/// | any | absent | no |
///
/// Prices are ignored. The result keeps the order of `current`.
pub fn diff<'a>(previous: &Batch, current: &'a Batch) -> Vec<&'a MatchRecord> {
    let mut previous = previous.iter();

    current
        .iter()
        .filter(|cur| match previous.next() {
            None => cur.is_available(),
            Some(prev) => has_new_tier(prev, cur),
        })
        .collect()
}

fn has_new_tier(previous: &MatchRecord, current: &MatchRecord) -> bool {
    let known = previous.qualities();
    current
        .available_categories
        .iter()
        .any(|c| !known.contains(&c.quality))
}
