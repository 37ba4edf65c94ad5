use crate::config::types::{Config, CrawlerConfig, UserAgentConfig, MAX_DURATION_SECS};
use crate::ConfigError;
use url::Url;

const MAX_CONCURRENCY: usize = 64;

/// Validates the entire configuration
///
/// Runs after file loading and again after CLI overrides are applied.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // max_depth >= 0 is always true for u32, so no check needed

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if !(0.0..=MAX_DURATION_SECS).contains(&config.inter_request_delay) {
        return Err(ConfigError::Validation(format!(
            "inter_request_delay must be between 0 and {} seconds, got {}",
            MAX_DURATION_SECS, config.inter_request_delay
        )));
    }

    if !(config.fetch_timeout > 0.0 && config.fetch_timeout <= MAX_DURATION_SECS) {
        return Err(ConfigError::Validation(format!(
            "fetch_timeout must be positive and at most {} seconds, got {}",
            MAX_DURATION_SECS, config.fetch_timeout
        )));
    }

    if config.concurrency < 1 || config.concurrency > MAX_CONCURRENCY {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and {}, got {}",
            MAX_CONCURRENCY, config.concurrency
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    if let Some(contact) = &config.contact_url {
        Url::parse(contact)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;
    }

    Ok(())
}
