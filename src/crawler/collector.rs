//! Batch collection over the slot range
//!
//! Every slot yields one outcome. Outcomes are consumed in ascending slot
//! order and collection stops at the first error, so a batch is either
//! complete or not produced at all.

use crate::config::{FetcherConfig, SlotRange};
use crate::crawler::extractor::extract_match;
use crate::crawler::fetcher::{build_http_client, fetch_with_retry, FetchError, RetryPolicy};
use crate::model::{Batch, MatchRecord};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use thiserror::Error;

/// A failed slot, identified by its 1-based match number
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("match_number: {match_number}. {error}")]
pub struct SlotError {
    pub match_number: u32,
    pub error: FetchError,
}

impl SlotError {
    pub fn new(index: u32, error: impl Into<FetchError>) -> Self {
        Self {
            match_number: index + 1,
            error: error.into(),
        }
    }
}

/// Outcome of fetching one slot
pub type SlotOutcome = Result<MatchRecord, SlotError>;

/// Produces the outcome of each slot in the watched range
#[async_trait]
pub trait SlotSource: Send + Sync {
    /// Number of slots in the range
    fn slot_count(&self) -> u32;

    /// Fetches and extracts the 0-based slot `index`
    async fn fetch_slot(&self, index: u32) -> SlotOutcome;
}

/// Slot source backed by the ticketing site
pub struct HttpSlotSource {
    client: Client,
    slots: SlotRange,
    policy: RetryPolicy,
}

impl HttpSlotSource {
    /// Creates a source with its own HTTP client
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        let client = build_http_client(config)?;
        Ok(Self::with_client(client, config))
    }

    /// Creates a source sharing an existing client
    pub fn with_client(client: Client, config: &FetcherConfig) -> Self {
        Self {
            client,
            slots: config.slots(),
            policy: RetryPolicy::from_config(config),
        }
    }
}

#[async_trait]
impl SlotSource for HttpSlotSource {
    fn slot_count(&self) -> u32 {
        self.slots.slot_count
    }

    async fn fetch_slot(&self, index: u32) -> SlotOutcome {
        let url = self.slots.url_for_slot(index);
        tracing::debug!("Fetching slot {} from {}", index, url);

        let body = fetch_with_retry(&self.client, &url, &self.policy)
            .await
            .map_err(|e| SlotError::new(index, e))?;

        extract_match(&body).map_err(|e| SlotError::new(index, e))
    }
}

/// Collects a complete batch or the first failing slot
///
/// Up to `max_concurrent` slots are in flight at once, but outcomes are
/// consumed strictly in slot order. On the first error the remaining
/// requests are dropped and that error is returned, so the reported slot is
/// always the lowest failing one.
pub async fn collect_batch<S>(source: &S, max_concurrent: usize) -> Result<Batch, SlotError>
where
    S: SlotSource + ?Sized,
{
    let count = source.slot_count();
    let mut outcomes = stream::iter(0..count)
        .map(|index| source.fetch_slot(index))
        .buffered(max_concurrent.max(1));

    let mut records = Vec::with_capacity(count as usize);

    while let Some(outcome) = outcomes.next().await {
        match outcome {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!("Stopping batch collection: {}", e);
                return Err(e);
            }
        }
    }

    tracing::debug!("Collected {} slots", records.len());
    Ok(Batch::from(records))
}
