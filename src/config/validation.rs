use crate::config::types::{
    Config, FetcherConfig, NotificationTarget, NotifierConfig, RunConfig, StoreConfig,
    MAX_STALENESS_THRESHOLD_SECS, PERFORMANCE_ID_PLACEHOLDER,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetcher_config(&config.fetcher)?;
    validate_store_config(&config.store)?;
    validate_notifier_config(&config.notifier)?;
    validate_run_config(&config.run)?;
    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if !config.url_template.contains(PERFORMANCE_ID_PLACEHOLDER) {
        return Err(ConfigError::Validation(format!(
            "url_template must contain {}, got '{}'",
            PERFORMANCE_ID_PLACEHOLDER, config.url_template
        )));
    }

    // The first slot URL stands in for all of them
    let sample = config.slots().url_for_slot(0);
    validate_http_url("url_template", &sample)?;

    if config.slot_count < 1 || config.slot_count > 256 {
        return Err(ConfigError::Validation(format!(
            "slot_count must be between 1 and 256, got {}",
            config.slot_count
        )));
    }

    if config.max_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "max_attempts must be >= 1, got {}",
            config.max_attempts
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "fetcher timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.max_concurrent_requests < 1 || config.max_concurrent_requests > 64 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_requests must be between 1 and 64, got {}",
            config.max_concurrent_requests
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates store configuration
fn validate_store_config(config: &StoreConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates notifier configuration
fn validate_notifier_config(config: &NotifierConfig) -> Result<(), ConfigError> {
    validate_http_url("api_base_url", &config.api_base_url)?;

    if config.api_token.trim().is_empty() {
        return Err(ConfigError::Validation(
            "api_token cannot be empty".to_string(),
        ));
    }

    if config.user_id.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_id cannot be empty".to_string(),
        ));
    }

    if config.target == NotificationTarget::Broadcast && config.channel_id.trim().is_empty() {
        return Err(ConfigError::Validation(
            "channel_id is required when target is broadcast".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "notifier timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates run policy configuration
fn validate_run_config(config: &RunConfig) -> Result<(), ConfigError> {
    if config.staleness_threshold_secs < 1
        || config.staleness_threshold_secs > MAX_STALENESS_THRESHOLD_SECS
    {
        return Err(ConfigError::Validation(format!(
            "staleness_threshold_secs must be between 1 and {}, got {}",
            MAX_STALENESS_THRESHOLD_SECS, config.staleness_threshold_secs
        )));
    }

    Ok(())
}

/// Checks that `value` parses as an http or https URL
fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} must use http or https, got '{}'",
            field, value
        )));
    }

    Ok(())
}
