//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the watcher, including:
//! - Building the HTTP client with the configured user agent and timeout
//! - GET requests for match pages
//! - Bounded retries with exponential backoff
//! - Status classification

use crate::config::FetcherConfig;
use crate::ExtractionError;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Statuses that are retried before giving up
const RETRY_STATUSES: [StatusCode; 4] = [
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

/// Failure of a single page fetch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Network error or server error that persisted through every attempt
    #[error("Transient error after {attempts} attempts: {message}")]
    Transient { attempts: u32, message: String },

    /// The final response was not 200 OK
    #[error("Unexpected status code: {status}")]
    BadStatus { status: u16 },

    /// The page arrived but could not be read as a match listing
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
}

/// How often and how patiently a page is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_factor: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &FetcherConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            backoff_factor: Duration::from_millis(config.backoff_factor_ms),
        }
    }

    /// Delay after the failed `attempt` (1-based): `factor * 2^(attempt - 1)`
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.backoff_factor.saturating_mul(1 << exponent)
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use ticket_watch::config::load_config;
/// use ticket_watch::crawler::build_http_client;
/// use std::path::Path;
///
/// let config = load_config(Path::new("config.toml")).unwrap();
/// let client = build_http_client(&config.fetcher).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL, retrying server errors and transport failures
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | HTTP 200 | Return body |
/// | HTTP 500, 502, 503, 504 | Retry with backoff, then `Transient` |
/// | Transport error | Retry with backoff, then `Transient` |
/// | Any other status | Immediate `BadStatus` |
///
/// # Returns
///
/// The raw response body on success. Exhausted retries are returned as an
/// error value, never a panic.
pub async fn fetch_with_retry(
    client: &Client,
    url: &str,
    policy: &RetryPolicy,
) -> Result<Vec<u8>, FetchError> {
    let mut attempt = 0;

    loop {
        attempt += 1;

        let failure = match client.get(url).send().await {
            Ok(response) => {
                let status = response.status();

                if status == StatusCode::OK {
                    match response.bytes().await {
                        Ok(body) => return Ok(body.to_vec()),
                        Err(e) => describe_transport_error(&e),
                    }
                } else if RETRY_STATUSES.contains(&status) {
                    format!("server responded with {}", status.as_u16())
                } else {
                    return Err(FetchError::BadStatus {
                        status: status.as_u16(),
                    });
                }
            }
            Err(e) => describe_transport_error(&e),
        };

        if attempt >= policy.max_attempts {
            return Err(FetchError::Transient {
                attempts: attempt,
                message: failure,
            });
        }

        let delay = policy.backoff(attempt);
        tracing::warn!(
            "Attempt {}/{} for {} failed ({}), retrying in {:?}",
            attempt,
            policy.max_attempts,
            url,
            failure,
            delay
        );
        tokio::time::sleep(delay).await;
    }
}

fn describe_transport_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timeout".to_string()
    } else if error.is_connect() {
        "connection refused".to_string()
    } else {
        error.to_string()
    }
}
