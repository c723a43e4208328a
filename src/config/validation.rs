//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, admission limit > 0)
//! - Check the bind address and upstream URL are usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    BindAddress(String),

    #[error("listener.max_in_flight must be at least 1")]
    ZeroInFlight,

    #[error("upstream.base_url {url:?} is invalid: {reason}")]
    UpstreamUrl { url: String, reason: String },

    #[error("upstream.{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.listener.max_in_flight == 0 {
        errors.push(ValidationError::ZeroInFlight);
    }

    if let Err(reason) = check_upstream_url(&config.upstream.base_url) {
        errors.push(ValidationError::UpstreamUrl {
            url: config.upstream.base_url.clone(),
            reason,
        });
    }

    if config.upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_timeout_secs"));
    }
    if config.upstream.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_timeout_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// The relay appends `?q=...` itself, so the base must not carry a query.
fn check_upstream_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme {other:?}")),
    }
    if url.query().is_some() || raw.contains('?') {
        return Err("must not contain a query string".to_string());
    }
    if url.fragment().is_some() {
        return Err("must not contain a fragment".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&RelayConfig::default()), Ok(()));
    }

    #[test]
    fn reports_every_problem() {
        let mut config = RelayConfig::default();
        config.listener.bind_address = "localhost".into();
        config.listener.max_in_flight = 0;
        config.upstream.request_timeout_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::BindAddress("localhost".into()),
                ValidationError::ZeroInFlight,
                ValidationError::ZeroTimeout("request_timeout_secs"),
            ]
        );
    }

    #[test]
    fn rejects_upstream_with_query() {
        let mut config = RelayConfig::default();
        config.upstream.base_url = "https://api.pokemontcg.io/v2/cards?page=2".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::UpstreamUrl { .. }));
    }

    #[test]
    fn rejects_non_http_upstream() {
        let mut config = RelayConfig::default();
        config.upstream.base_url = "ftp://example.com/cards".into();
        assert!(validate_config(&config).is_err());

        config.upstream.base_url = "not a url".into();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn accepts_plain_http_upstream() {
        let mut config = RelayConfig::default();
        config.upstream.base_url = "http://127.0.0.1:3000/v2/cards".into();
        assert_eq!(validate_config(&config), Ok(()));
    }
}
