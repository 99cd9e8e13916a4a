use crate::config::types::{Config, FetchConfig, OutputConfig, RateLimitConfig, SiteConfig};
use crate::ConfigError;

/// Floor for the pause between requests, in seconds
pub const MIN_DELAY_FLOOR_SECS: f64 = 1.0;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_fetch_config(&config.fetch)?;
    validate_rate_limit_config(&config.rate_limit)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the site domain token
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let domain = config.domain.trim();

    if domain.is_empty() {
        return Err(ConfigError::Validation(
            "site domain cannot be empty".to_string(),
        ));
    }

    if domain.contains("://") || domain.contains('/') {
        return Err(ConfigError::Validation(format!(
            "site domain must be a bare host like 'zillow.com', got '{}'",
            config.domain
        )));
    }

    if domain.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "site domain cannot contain whitespace, got '{}'",
            config.domain
        )));
    }

    Ok(())
}

/// Validates HTTP request configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 1 and 300, got {}",
            config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates pacing configuration
fn validate_rate_limit_config(config: &RateLimitConfig) -> Result<(), ConfigError> {
    if !config.min_delay_secs.is_finite() || config.min_delay_secs < MIN_DELAY_FLOOR_SECS {
        return Err(ConfigError::Validation(format!(
            "min-delay-secs must be >= {}s, got {}s",
            MIN_DELAY_FLOOR_SECS, config.min_delay_secs
        )));
    }

    if !config.max_delay_secs.is_finite() || config.max_delay_secs < config.min_delay_secs {
        return Err(ConfigError::Validation(format!(
            "max-delay-secs ({}) must be >= min-delay-secs ({})",
            config.max_delay_secs, config.min_delay_secs
        )));
    }

    if config.volume_threshold < 1 {
        return Err(ConfigError::Validation(
            "volume-threshold must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.file_prefix.trim().is_empty() {
        return Err(ConfigError::Validation(
            "file-prefix cannot be empty".to_string(),
        ));
    }

    if config.file_prefix.contains('/') || config.file_prefix.contains('\\') {
        return Err(ConfigError::Validation(format!(
            "file-prefix must be a file name, not a path: '{}'",
            config.file_prefix
        )));
    }

    if config.error_log.trim().is_empty() {
        return Err(ConfigError::Validation(
            "error-log cannot be empty".to_string(),
        ));
    }

    Ok(())
}
