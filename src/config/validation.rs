use crate::config::types::{
    BatchingConfig, Config, DiscoveryConfig, StorageBackend, StorageConfig, UserAgentConfig,
};
use crate::crawler::SelectionPattern;
use crate::storage::validate_object_name;
use crate::ConfigError;
use url::Url;

/// Upper bound for the per-request fetch timeout (seconds)
const MAX_FETCH_TIMEOUT_SECS: u64 = 600;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_discovery_config(&config.discovery)?;
    validate_batching_config(&config.batching)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_storage_config(&config.storage)?;
    Ok(())
}

/// Validates sitemap discovery configuration
fn validate_discovery_config(config: &DiscoveryConfig) -> Result<(), ConfigError> {
    validate_http_url("root_url", &config.root_url)?;

    SelectionPattern::parse(&config.index_pattern)?;
    SelectionPattern::parse(&config.leaf_pattern)?;

    if config.fetch_timeout_secs < 1 || config.fetch_timeout_secs > MAX_FETCH_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "fetch_timeout_secs must be between 1 and {}, got {}",
            MAX_FETCH_TIMEOUT_SECS, config.fetch_timeout_secs
        )));
    }

    Ok(())
}

/// Validates batch partitioning configuration
fn validate_batching_config(config: &BatchingConfig) -> Result<(), ConfigError> {
    if config.batch_size < 1 {
        return Err(ConfigError::Validation(format!(
            "batch_size must be >= 1, got {}",
            config.batch_size
        )));
    }
    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Crawler name: non-empty, alphanumeric + hyphens only
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

    if let Some(contact_url) = &config.contact_url {
        Url::parse(contact_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;
    }

    if let Some(email) = &config.contact_email {
        validate_email(email)?;
    }

    Ok(())
}

/// Validates export destination configuration
fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    validate_object_name(&config.bucket)
        .map_err(|e| ConfigError::Validation(format!("Invalid bucket: {}", e)))?;

    match config.backend {
        StorageBackend::Directory | StorageBackend::Sqlite => {
            if config.path.as_deref().map_or(true, str::is_empty) {
                return Err(ConfigError::Validation(format!(
                    "storage.path is required for the {:?} backend",
                    config.backend
                )));
            }
        }
        StorageBackend::Http => {
            let endpoint = config.endpoint.as_deref().ok_or_else(|| {
                ConfigError::Validation("storage.endpoint is required for the Http backend".into())
            })?;
            validate_http_url("endpoint", endpoint)?;

            if config.token_env.is_empty() {
                return Err(ConfigError::Validation(
                    "token_env cannot be empty".to_string(),
                ));
            }
        }
    }

    Ok(())
}

/// Validates that a URL parses and uses an HTTP(S) scheme
fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!(
            "{} cannot be empty",
            field
        )));
    }

    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "{} '{}' must use HTTP or HTTPS",
            field, value
        )));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    let (local, domain) = email.split_once('@').ok_or_else(|| {
        ConfigError::Validation(format!("Invalid email format: '{}'", email))
    })?;

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
