//! Notifier trait and error types

use crate::model::MatchRecord;
use async_trait::async_trait;
use thiserror::Error;

/// Errors from notification delivery
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Bot API responded with status {status}: {description}")]
    Api { status: u16, description: String },
}

/// Result type for notifier operations
pub type NotifyResult<T> = Result<T, NotifyError>;

/// Delivers change and error notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Announces that a match has newly available categories
    async fn notify_change(&self, record: &MatchRecord) -> NotifyResult<()>;

    /// Reports an error to the operator
    async fn notify_error(&self, message: &str) -> NotifyResult<()>;
}
