//! Configuration validation.
//!
//! Serde handles syntax; this module checks meaning: the selected network
//! exists, URLs parse, contract addresses are valid hex addresses and
//! timeouts are positive. All problems are reported, not just the first.

use alloy::primitives::Address;
use std::fmt;

use crate::config::schema::SuretyConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &SuretyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !config.networks.contains_key(&config.network) {
        errors.push(ValidationError::new(
            "network",
            format!("unknown network '{}'", config.network),
        ));
    }

    for (name, network) in &config.networks {
        if network.url.parse::<url::Url>().is_err() {
            errors.push(ValidationError::new(
                format!("networks.{name}.url"),
                format!("invalid URL '{}'", network.url),
            ));
        }
        if network.app_address.parse::<Address>().is_err() {
            errors.push(ValidationError::new(
                format!("networks.{name}.app_address"),
                format!("invalid contract address '{}'", network.app_address),
            ));
        }
    }

    if config.client.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "client.rpc_timeout_secs",
            "must be greater than zero",
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<std::net::SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("invalid socket address '{}'", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
