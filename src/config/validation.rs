//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Parse the backend origin once, before any request is served
//! - Validate value ranges (port and timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::http::origin::{BackendOrigin, OriginError};

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("backend.url is required")]
    MissingBackendUrl,

    #[error("backend.url {url:?} is invalid: {source}")]
    InvalidBackendUrl { url: String, source: OriginError },

    #[error("auth.username must not be empty")]
    EmptyUsername,

    #[error("auth.password must not be empty unless auth.username is \"*\"")]
    EmptyPassword,

    #[error("listener.port must be greater than zero")]
    ZeroPort,

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("observability.log_level {0:?} is not a known level")]
    InvalidLogLevel(String),

    #[error("observability.metrics_address {0:?} is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let url = config.backend.url.trim();
    if url.is_empty() {
        errors.push(ValidationError::MissingBackendUrl);
    } else if let Err(source) = BackendOrigin::parse(url) {
        errors.push(ValidationError::InvalidBackendUrl {
            url: url.to_string(),
            source,
        });
    }

    if config.auth.username.is_empty() {
        errors.push(ValidationError::EmptyUsername);
    }
    if config.auth.password.is_empty() && !config.auth.is_wildcard() {
        errors.push(ValidationError::EmptyPassword);
    }

    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    let timeouts = [
        ("backend.connect_timeout_secs", config.backend.connect_timeout_secs),
        ("backend.request_timeout_secs", config.backend.request_timeout_secs),
        ("backend.pool_idle_timeout_secs", config.backend.pool_idle_timeout_secs),
    ];
    for (field, value) in timeouts {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout(field));
        }
    }

    if config.observability.log_level.parse::<tracing::Level>().is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ProxyConfig {
        let mut config = ProxyConfig::default();
        config.backend.url = "http://localhost:9000".into();
        config
    }

    #[test]
    fn accepts_minimal_config() {
        assert_eq!(validate_config(&valid_config()), Ok(()));
    }

    #[test]
    fn backend_url_is_required() {
        let errors = validate_config(&ProxyConfig::default()).unwrap_err();
        assert_eq!(errors, vec![ValidationError::MissingBackendUrl]);
    }

    #[test]
    fn rejects_non_http_backend() {
        let mut config = valid_config();
        config.backend.url = "ftp://files.internal".into();

        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            errors.as_slice(),
            [ValidationError::InvalidBackendUrl { .. }]
        ));
    }

    #[test]
    fn wildcard_username_is_valid() {
        let mut config = valid_config();
        config.auth.username = "*".into();
        config.auth.password = String::new();
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn exact_mode_needs_a_password() {
        let mut config = valid_config();
        config.auth.password = String::new();
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::EmptyPassword])
        );
    }

    #[test]
    fn collects_every_error() {
        let mut config = ProxyConfig::default();
        config.auth.username = String::new();
        config.auth.password = String::new();
        config.listener.port = 0;
        config.backend.request_timeout_secs = 0;
        config.observability.log_level = "loud".into();
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "not-an-address".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::MissingBackendUrl,
                ValidationError::EmptyUsername,
                ValidationError::EmptyPassword,
                ValidationError::ZeroPort,
                ValidationError::ZeroTimeout("backend.request_timeout_secs"),
                ValidationError::InvalidLogLevel("loud".into()),
                ValidationError::InvalidMetricsAddress("not-an-address".into()),
            ]
        );
    }

    #[test]
    fn metrics_address_ignored_when_disabled() {
        let mut config = valid_config();
        config.observability.metrics_address = "nope".into();
        assert_eq!(validate_config(&config), Ok(()));
    }
}
