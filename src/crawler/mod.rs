//! Crawler module for match page fetching and extraction
//!
//! This module contains the acquisition side of a run:
//! - HTTP fetching with retry logic
//! - Match page extraction
//! - Ordered, fail-fast batch collection over the slot range

mod collector;
mod extractor;
mod fetcher;

pub use collector::{collect_batch, HttpSlotSource, SlotError, SlotOutcome, SlotSource};
pub use extractor::extract_match;
pub use fetcher::{build_http_client, fetch_with_retry, FetchError, RetryPolicy};
