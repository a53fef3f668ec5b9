use crate::config::types::{Config, CrawlerConfig, OutputConfig, PatternConfig};
use crate::ConfigError;
use regex::RegexBuilder;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_patterns(&config.patterns)?;
    validate_output_config(&config.output)?;
    validate_domains(&config.domains)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages_per_domain < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages-per-domain must be >= 1, got {}",
            config.max_pages_per_domain
        )));
    }

    if config.max_concurrent_requests < 1 {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-requests must be >= 1, got {}",
            config.max_concurrent_requests
        )));
    }

    if config.max_connections_per_host < 1 {
        return Err(ConfigError::Validation(format!(
            "max-connections-per-host must be >= 1, got {}",
            config.max_connections_per_host
        )));
    }

    if config.batch_size < 1 {
        return Err(ConfigError::Validation(format!(
            "batch-size must be >= 1, got {}",
            config.batch_size
        )));
    }

    if !config.request_delay.is_finite() || config.request_delay < 0.0 {
        return Err(ConfigError::Validation(format!(
            "request-delay must be a non-negative number of seconds, got {}",
            config.request_delay
        )));
    }

    if !config.timeout.is_finite() || config.timeout <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "timeout must be a positive number of seconds, got {}",
            config.timeout
        )));
    }

    Ok(())
}

/// Validates that every configured URL pattern compiles as a regex
///
/// Compiling here means a bad pattern fails at startup with a field-named
/// error instead of surfacing mid-crawl.
fn validate_patterns(patterns: &PatternConfig) -> Result<(), ConfigError> {
    validate_pattern_list("product", &patterns.product)?;
    validate_pattern_list("category", &patterns.category)?;
    validate_pattern_list("pagination", &patterns.pagination)?;
    Ok(())
}

fn validate_pattern_list(kind: &'static str, patterns: &[String]) -> Result<(), ConfigError> {
    if patterns.is_empty() {
        return Err(ConfigError::Validation(format!(
            "{} pattern list cannot be empty",
            kind
        )));
    }

    for pattern in patterns {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| ConfigError::InvalidPattern {
                kind,
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.results_path.is_empty() {
        return Err(ConfigError::Validation(
            "results-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the seed domain list
fn validate_domains(domains: &[String]) -> Result<(), ConfigError> {
    if domains.is_empty() {
        return Err(ConfigError::Validation(
            "domains list cannot be empty".to_string(),
        ));
    }

    for domain in domains {
        if domain.trim().is_empty() {
            return Err(ConfigError::Validation(
                "domains list contains an empty entry".to_string(),
            ));
        }
    }

    Ok(())
}
