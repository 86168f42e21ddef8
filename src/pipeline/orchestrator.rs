//! Run orchestration
//!
//! A run fetches the whole slot range, then (when persistence is enabled)
//! compares it with the latest snapshot, notifies about changes and stores
//! the new batch.
//!
//! # Run Flow
//!
//! 1. Collect the batch; the first failing slot aborts the run
//! 2. Stop here if `update-state` is off
//! 3. Read the latest snapshot and warn if it is stale
//! 4. Notify every changed match
//! 5. Persist the batch as a new snapshot
//!
//! Every terminal error is sent through the notifier error channel before it
//! is returned.

use crate::config::RunConfig;
use crate::crawler::{collect_batch, SlotSource};
use crate::model::{Batch, Snapshot};
use crate::notify::Notifier;
use crate::pipeline::diff::diff;
use crate::storage::SnapshotStore;
use crate::{Result, WatchError};
use chrono::{DateTime, Utc};

/// Summary of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Number of matches fetched
    pub fetched: usize,

    /// Match numbers a change notification was sent for
    pub changed: Vec<u32>,

    /// Whether the previous snapshot was older than the threshold
    pub stale_warning: bool,

    /// Timestamp of the stored snapshot, `None` when persistence is off
    pub persisted_at: Option<DateTime<Utc>>,
}

/// One watcher run over a slot source, a snapshot store and a notifier
pub struct Pipeline<Src, St, N> {
    source: Src,
    store: St,
    notifier: N,
    run: RunConfig,
    max_concurrent: usize,
}

impl<Src, St, N> Pipeline<Src, St, N>
where
    Src: SlotSource,
    St: SnapshotStore,
    N: Notifier,
{
    pub fn new(source: Src, store: St, notifier: N, run: RunConfig, max_concurrent: usize) -> Self {
        Self {
            source,
            store,
            notifier,
            run,
            max_concurrent,
        }
    }

    pub fn store(&self) -> &St {
        &self.store
    }

    /// Performs a single run
    ///
    /// # Returns
    ///
    /// * `Ok(RunReport)` - The run completed
    /// * `Err(WatchError::FetchAbort)` - A slot failed; nothing was diffed or stored
    /// * `Err(WatchError::UpdateStateFailure)` - Reading, notifying or storing failed
    pub async fn run(&mut self) -> Result<RunReport> {
        tracing::info!("Fetching {} slots", self.source.slot_count());

        let batch = match collect_batch(&self.source, self.max_concurrent).await {
            Ok(batch) => batch,
            Err(e) => {
                let error = WatchError::FetchAbort(e);
                self.report_error(&error.to_string()).await;
                return Err(error);
            }
        };

        let mut report = RunReport {
            fetched: batch.len(),
            ..RunReport::default()
        };

        tracing::info!(
            "Fetched {} matches, {} with tickets on sale",
            batch.len(),
            batch.available_count()
        );

        if !self.run.update_state {
            tracing::info!("State updates disabled, skipping diff and persistence");
            return Ok(report);
        }

        if let Err(e) = self.update_state(&batch, &mut report).await {
            let error = WatchError::UpdateStateFailure(Box::new(e));
            tracing::error!("{}", error);
            self.report_error(&error.to_string()).await;
            return Err(error);
        }

        tracing::info!(
            "Run complete: {} changed, snapshot stored",
            report.changed.len()
        );
        Ok(report)
    }

    async fn update_state(&mut self, batch: &Batch, report: &mut RunReport) -> Result<()> {
        let previous = self.store.latest()?;
        let now = Utc::now();

        if !previous.is_empty() && previous.is_stale(now, self.run.staleness_threshold()) {
            let warning = format!(
                "Stored snapshot is stale: last update at {}, threshold {}s",
                previous.timestamp.to_rfc3339(),
                self.run.staleness_threshold_secs
            );
            tracing::warn!("{}", warning);
            report.stale_warning = true;
            self.notifier.notify_error(&warning).await?;
        }

        let changed = diff(&previous.batch, batch);
        for record in &changed {
            tracing::info!("Match {} has new categories", record.match_number);
            self.notifier.notify_change(record).await?;
        }
        report.changed = changed.iter().map(|r| r.match_number).collect();

        let snapshot = Snapshot::new(previous.next_timestamp(now), batch.clone());
        self.store.put(&snapshot)?;
        report.persisted_at = Some(snapshot.timestamp);

        Ok(())
    }

    /// Sends an error report, logging instead of failing if delivery fails
    async fn report_error(&self, message: &str) {
        if let Err(e) = self.notifier.notify_error(message).await {
            tracing::error!("Failed to deliver error report: {}", e);
        }
    }
}
