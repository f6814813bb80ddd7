//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the listener address resolves (IP literal or hostname)
//! - Validate value ranges (intervals > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: ServerConfig → Result<(), Vec<ValidationError>>

use std::net::ToSocketAddrs;

use thiserror::Error;

use crate::config::schema::ServerConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener address '{0}' does not resolve to a socket address")]
    InvalidAddress(String),

    #[error("faults.growth_interval_ms must be greater than 0")]
    ZeroGrowthInterval,

    #[error("faults.delay_secs must be greater than 0")]
    ZeroDelay,

    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Check a configuration, collecting every error found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let address = config.listener.bind_address();
    let resolves = address.to_socket_addrs().map(|mut addrs| addrs.next().is_some());
    if !matches!(resolves, Ok(true)) {
        errors.push(ValidationError::InvalidAddress(address));
    }

    if config.faults.growth_interval_ms == 0 {
        errors.push(ValidationError::ZeroGrowthInterval);
    }

    if config.faults.delay_secs == 0 {
        errors.push(ValidationError::ZeroDelay);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(config.observability.log_level.clone()));
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

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ServerConfig::default()).is_ok());
    }

    #[test]
    fn test_hostname_listener_is_valid() {
        let mut config = ServerConfig::default();
        config.listener.host = "localhost".into();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_unresolvable_host_rejected() {
        let mut config = ServerConfig::default();
        config.listener.host = "not a host".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::InvalidAddress("not a host:8080".into())]);
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ServerConfig::default();
        config.listener.host = "not a host".into();
        config.faults.growth_interval_ms = 0;
        config.faults.delay_secs = 0;
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::ZeroGrowthInterval));
        assert!(errors.contains(&ValidationError::UnknownLogLevel("loud".into())));
    }
}
