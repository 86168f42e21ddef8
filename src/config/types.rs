use serde::Deserialize;

/// Placeholder substituted with a slot's performance id in the URL template
pub const PERFORMANCE_ID_PLACEHOLDER: &str = "{performance_id}";

/// Largest accepted staleness threshold, ten years in seconds
pub const MAX_STALENESS_THRESHOLD_SECS: u64 = 10 * 365 * 86_400;

/// Main configuration structure for Ticket-Watch
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub fetcher: FetcherConfig,
    pub store: StoreConfig,
    pub notifier: NotifierConfig,
    #[serde(default)]
    pub run: RunConfig,
}

/// Ticketing page fetch configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// URL of a match page with a `{performance_id}` placeholder
    #[serde(rename = "url-template")]
    pub url_template: String,

    /// Performance id of the first slot
    #[serde(rename = "first-performance-id")]
    pub first_performance_id: u64,

    /// Number of slots (matches) to fetch
    #[serde(rename = "slot-count", default = "defaults::slot_count")]
    pub slot_count: u32,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "defaults::user_agent")]
    pub user_agent: String,

    /// Attempts per page before the slot is reported as failed
    #[serde(rename = "max-attempts", default = "defaults::max_attempts")]
    pub max_attempts: u32,

    /// Base delay for exponential backoff between attempts (milliseconds)
    #[serde(rename = "backoff-factor-ms", default = "defaults::backoff_factor_ms")]
    pub backoff_factor_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "defaults::fetch_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of pages fetched at the same time
    #[serde(
        rename = "max-concurrent-requests",
        default = "defaults::max_concurrent_requests"
    )]
    pub max_concurrent_requests: u32,
}

impl FetcherConfig {
    /// Returns the slot range described by this configuration
    pub fn slots(&self) -> SlotRange {
        SlotRange {
            url_template: self.url_template.clone(),
            first_performance_id: self.first_performance_id,
            slot_count: self.slot_count,
        }
    }
}

/// Maps slot indices and match numbers to remote performance ids and URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRange {
    pub url_template: String,
    pub first_performance_id: u64,
    pub slot_count: u32,
}

impl SlotRange {
    /// Performance id of the 0-based slot `index`
    pub fn performance_id(&self, index: u32) -> u64 {
        self.first_performance_id + u64::from(index)
    }

    /// Page URL of the 0-based slot `index`
    pub fn url_for_slot(&self, index: u32) -> String {
        self.url_template.replace(
            PERFORMANCE_ID_PLACEHOLDER,
            &self.performance_id(index).to_string(),
        )
    }

    /// Page URL of the match with the 1-based `match_number`
    pub fn url_for_match(&self, match_number: u32) -> String {
        self.url_for_slot(match_number.saturating_sub(1))
    }
}

/// Snapshot store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// How long a store call waits on a locked database (milliseconds)
    #[serde(rename = "busy-timeout-ms", default = "defaults::busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

/// Where change notifications are delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationTarget {
    /// Direct message to the configured user
    #[default]
    Direct,

    /// Post to the configured channel
    Broadcast,
}

/// Telegram notifier configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NotifierConfig {
    /// Bot API base URL
    #[serde(rename = "api-base-url", default = "defaults::api_base_url")]
    pub api_base_url: String,

    /// Bot API token
    #[serde(rename = "api-token")]
    pub api_token: String,

    /// Chat id of the user receiving direct messages and error reports
    #[serde(rename = "user-id")]
    pub user_id: String,

    /// Chat id of the broadcast channel
    #[serde(rename = "channel-id", default)]
    pub channel_id: String,

    #[serde(default)]
    pub target: NotificationTarget,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "defaults::notify_timeout_secs")]
    pub timeout_secs: u64,
}

/// Run policy configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// Whether to diff, notify and persist after fetching
    #[serde(rename = "update-state", default = "defaults::update_state")]
    pub update_state: bool,

    /// Age after which the stored snapshot triggers a warning (seconds)
    #[serde(
        rename = "staleness-threshold-secs",
        default = "defaults::staleness_threshold_secs"
    )]
    pub staleness_threshold_secs: u64,
}

impl RunConfig {
    /// Staleness threshold, clamped to [`MAX_STALENESS_THRESHOLD_SECS`]
    pub fn staleness_threshold(&self) -> chrono::Duration {
        let secs = self
            .staleness_threshold_secs
            .min(MAX_STALENESS_THRESHOLD_SECS);
        chrono::Duration::seconds(secs as i64)
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            update_state: defaults::update_state(),
            staleness_threshold_secs: defaults::staleness_threshold_secs(),
        }
    }
}

mod defaults {
    pub fn slot_count() -> u32 {
        64
    }
    pub fn user_agent() -> String {
        format!("ticket-watch/{}", env!("CARGO_PKG_VERSION"))
    }
    pub fn max_attempts() -> u32 {
        5
    }
    pub fn backoff_factor_ms() -> u64 {
        100
    }
    pub fn fetch_timeout_secs() -> u64 {
        30
    }
    pub fn max_concurrent_requests() -> u32 {
        4
    }
    pub fn busy_timeout_ms() -> u64 {
        3000
    }
    pub fn api_base_url() -> String {
        "https://api.telegram.org".into()
    }
    pub fn notify_timeout_secs() -> u64 {
        60
    }
    pub fn update_state() -> bool {
        true
    }
    pub fn staleness_threshold_secs() -> u64 {
        3600
    }
}
