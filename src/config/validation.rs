//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse, status codes valid)
//! - Check inventory entries when the inventory comes from config
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: OptimizerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use axum::http::StatusCode;

use crate::config::schema::{InventorySource, OptimizerConfig};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
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
pub fn validate_config(config: &OptimizerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new(
            "timeouts.request_secs",
            "must be greater than 0",
        ));
    }

    if !config.api.path.starts_with('/') {
        errors.push(ValidationError::new("api.path", "must start with '/'"));
    }

    if StatusCode::from_u16(config.api.error_status).is_err() {
        errors.push(ValidationError::new(
            "api.error_status",
            format!("{} is not a valid HTTP status", config.api.error_status),
        ));
    }

    if config.threshold.variable.trim().is_empty() {
        errors.push(ValidationError::new("threshold.variable", "must not be empty"));
    }

    if config.inventory.source == InventorySource::Config {
        for (i, group) in config.inventory.groups.iter().enumerate() {
            if group.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("inventory.groups[{i}]"),
                    "must not be empty",
                ));
            }
        }
        for (i, endpoint) in config.inventory.endpoints.iter().enumerate() {
            if endpoint.group.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("inventory.endpoints[{i}].group"),
                    "must not be empty",
                ));
            }
            if endpoint.address.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("inventory.endpoints[{i}].address"),
                    "must not be empty",
                ));
            }
        }
    }

    let observability = &config.observability;
    if !matches!(observability.log_format.as_str(), "pretty" | "json") {
        errors.push(ValidationError::new(
            "observability.log_format",
            format!("expected 'pretty' or 'json', got '{}'", observability.log_format),
        ));
    }

    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", observability.metrics_address),
        ));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
