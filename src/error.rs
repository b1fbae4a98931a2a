//! Request-level error definitions.

use serde::Serialize;
use thiserror::Error;

/// Discrete error category reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Threshold value present but not an integer.
    ThresholdNotInteger,
    /// Threshold set nowhere and no default configured.
    ThresholdMissing,
    /// Settings file could not be loaded.
    ConfigurationLoad,
}

/// Errors raised while resolving the threshold for a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The threshold variable does not parse as an integer.
    #[error("threshold not an integer: {variable}={value:?}")]
    NotAnInteger { variable: String, value: String },

    /// The threshold variable is not set and there is no default.
    #[error("threshold {variable} is not set and no default is configured")]
    Missing { variable: String },

    /// The backing settings file exists but cannot be read.
    #[error("failed to load settings file {path}: {reason}")]
    LoadFailure { path: String, reason: String },
}

impl ConfigurationError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfigurationError::NotAnInteger { .. } => ErrorKind::ThresholdNotInteger,
            ConfigurationError::Missing { .. } => ErrorKind::ThresholdMissing,
            ConfigurationError::LoadFailure { .. } => ErrorKind::ConfigurationLoad,
        }
    }
}
