//! Change-detection pipeline
//!
//! Ties the crawler, the snapshot store and the notifier together into a
//! single run.

mod diff;
mod orchestrator;

pub use diff::diff;
pub use orchestrator::{Pipeline, RunReport};

use crate::config::Config;
use crate::crawler::HttpSlotSource;
use crate::notify::{Notifier, TelegramNotifier};
use crate::storage::{open_store, SqliteSnapshotStore};
use crate::{Result, WatchError};

/// Pipeline wired to the ticketing site, SQLite and Telegram
pub type LivePipeline = Pipeline<HttpSlotSource, SqliteSnapshotStore, TelegramNotifier>;

/// Builds the production pipeline from a validated configuration
///
/// A store that cannot be opened is reported through the notifier before the
/// error is returned.
pub async fn build_pipeline(config: &Config) -> Result<LivePipeline> {
    let source = HttpSlotSource::new(&config.fetcher)?;
    let notifier = TelegramNotifier::new(&config.notifier, config.fetcher.slots())?;

    let store = match open_store(&config.store) {
        Ok(store) => store,
        Err(e) => {
            let error = WatchError::Store(e);
            if let Err(report_err) = notifier.notify_error(&error.to_string()).await {
                tracing::error!("Failed to deliver error report: {}", report_err);
            }
            return Err(error);
        }
    };

    Ok(Pipeline::new(
        source,
        store,
        notifier,
        config.run.clone(),
        config.fetcher.max_concurrent_requests as usize,
    ))
}

/// Builds the production pipeline and performs one run
pub async fn run_once(config: &Config) -> Result<RunReport> {
    let mut pipeline = build_pipeline(config).await?;
    pipeline.run().await
}
