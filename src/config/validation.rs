use crate::config::types::{EngineConfig, RetryConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration.
pub fn validate(config: &EngineConfig) -> Result<(), ConfigError> {
    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout_secs must be greater than 0".to_string(),
        ));
    }

    if config.max_depth == 0 {
        return Err(ConfigError::Validation(
            "max_depth must be greater than 0".to_string(),
        ));
    }

    if config.max_pages == 0 {
        return Err(ConfigError::Validation(
            "max_pages must be greater than 0".to_string(),
        ));
    }

    if config.concurrent_requests_limit == 0 || config.concurrent_requests_limit > 256 {
        return Err(ConfigError::Validation(format!(
            "concurrent_requests_limit must be between 1 and 256, got {}",
            config.concurrent_requests_limit
        )));
    }

    if config.cache_ttl_secs == 0 {
        return Err(ConfigError::Validation(
            "cache_ttl_secs must be greater than 0".to_string(),
        ));
    }

    let origin_url = Url::parse(&config.article_origin)
        .map_err(|e| ConfigError::Validation(format!("invalid article-origin: {e}")))?;
    if origin_url.scheme() != "http" && origin_url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "article-origin must be http or https, got '{}'",
            config.article_origin
        )));
    }

    validate_retry_config(&config.retry)?;
    validate_user_agent_config(&config.user_agent)?;

    Ok(())
}

fn validate_retry_config(config: &RetryConfig) -> Result<(), ConfigError> {
    if config.max_retries > 10 {
        return Err(ConfigError::Validation(format!(
            "retry.max-retries must be <= 10, got {}",
            config.max_retries
        )));
    }

    Ok(())
}

fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent.crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "user-agent.crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::Validation(format!("invalid contact-url: {e}")))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent.contact-email cannot be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() || !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "invalid contact-email: '{email}'"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&EngineConfig::default()).is_ok());
    }

    #[test]
    fn rejects_zero_concurrency() {
        let mut config = EngineConfig::default();
        config.concurrent_requests_limit = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn rejects_bad_email() {
        let mut config = EngineConfig::default();
        config.user_agent.contact_email = "not-an-email".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn rejects_bad_contact_url() {
        let mut config = EngineConfig::default();
        config.user_agent.contact_url = "not a url".to_string();
        assert!(validate(&config).is_err());
    }
}
