//! Configuration module for Ticket-Watch
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use ticket_watch::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Watching {} slots", config.fetcher.slot_count);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, FetcherConfig, NotificationTarget, NotifierConfig, RunConfig, SlotRange, StoreConfig,
    MAX_STALENESS_THRESHOLD_SECS, PERFORMANCE_ID_PLACEHOLDER,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
