use super::{types::Config, ConfigError};

/// Largest number of search hits resolved per query.
const MAX_RESULTS_LIMIT: usize = 50;

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Catalog base URL is http(s)
/// - Default locale is set
/// - max_results is within 1..=50
/// - Cache TTL is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    let base_url = &config.catalog.base_url;
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(ConfigError::ValidationError(format!(
            "catalog.base_url must be an http(s) URL, got '{}'",
            base_url
        )));
    }

    if config.catalog.default_locale.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "catalog.default_locale cannot be empty".to_string(),
        ));
    }

    if config.catalog.max_results == 0 || config.catalog.max_results > MAX_RESULTS_LIMIT {
        return Err(ConfigError::ValidationError(format!(
            "catalog.max_results must be between 1 and {}",
            MAX_RESULTS_LIMIT
        )));
    }

    if config.cache.ttl_secs == 0 {
        return Err(ConfigError::ValidationError(
            "cache.ttl_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}
