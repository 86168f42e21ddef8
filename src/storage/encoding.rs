//! Persisted batch encoding
//!
//! A batch is stored as a JSON array of match objects, each carrying its
//! `available_categories` as an array of `{quality, price}` objects.

use crate::model::Batch;
use crate::storage::traits::StoreResult;

/// Encodes a batch as JSON text
pub fn encode_batch(batch: &Batch) -> StoreResult<String> {
    Ok(serde_json::to_string(batch)?)
}

/// Decodes a batch from JSON text
///
/// An empty payload decodes to an empty batch.
pub fn decode_batch(raw: &str) -> StoreResult<Batch> {
    if raw.trim().is_empty() {
        return Ok(Batch::new());
    }
    Ok(serde_json::from_str(raw)?)
}
