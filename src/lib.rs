//! Ticket-Watch: a ticket availability watcher
//!
//! This crate polls a fixed range of ticketing pages, extracts the match and
//! seat category listing from each, diffs the result against the last stored
//! snapshot and notifies about newly available categories.

pub mod config;
pub mod crawler;
pub mod model;
pub mod notify;
pub mod pipeline;
pub mod storage;

use thiserror::Error;

/// Main error type for Ticket-Watch operations
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Fetch aborted: {0}")]
    FetchAbort(crawler::SlotError),

    #[error("Storage error: {0}")]
    Store(#[from] storage::StoreError),

    #[error("Notification error: {0}")]
    Notify(#[from] notify::NotifyError),

    #[error("Failed to update state: {0}")]
    UpdateStateFailure(#[source] Box<WatchError>),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while extracting a match record from page markup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("Missing required element: {0}")]
    MissingElement(&'static str),

    #[error("Invalid number in {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Invalid selector: {0}")]
    InvalidSelector(&'static str),
}

/// Result type alias for Ticket-Watch operations
pub type Result<T> = std::result::Result<T, WatchError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use model::{Batch, MatchRecord, Snapshot, TicketCategory};
pub use pipeline::{diff, Pipeline, RunReport};
