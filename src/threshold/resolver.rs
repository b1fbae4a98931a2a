//! Per-request threshold resolution.

use std::env::VarError;
use std::sync::Arc;

use crate::config::ThresholdConfig;
use crate::error::ConfigurationError;
use crate::threshold::settings::SettingsStore;

/// Supplies the threshold for one query.
pub trait ThresholdSource: Send + Sync {
    fn resolve(&self) -> Result<i64, ConfigurationError>;
}

/// Parse a raw threshold value. Surrounding whitespace is ignored.
pub fn parse_threshold(variable: &str, raw: &str) -> Result<i64, ConfigurationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ConfigurationError::NotAnInteger {
            variable: variable.to_string(),
            value: raw.to_string(),
        })
}

/// Read an environment variable.
///
/// Non-UTF-8 values are returned lossily so they fail to parse instead of
/// counting as unset.
fn env_lookup(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) => Some(value),
        Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(raw)) => Some(raw.to_string_lossy().into_owned()),
    }
}

type EnvLookup = dyn Fn(&str) -> Option<String> + Send + Sync;

/// Threshold read from the environment, then the settings file, then the default.
///
/// Empty values count as unset.
pub struct EnvThreshold {
    variable: String,
    default: Option<i64>,
    settings: Arc<SettingsStore>,
    lookup: Arc<EnvLookup>,
}

impl EnvThreshold {
    /// Resolver backed by the process environment.
    pub fn new(config: &ThresholdConfig, settings: Arc<SettingsStore>) -> Self {
        Self::with_lookup(config, settings, env_lookup)
    }

    /// Resolver with a custom environment lookup.
    pub fn with_lookup<F>(config: &ThresholdConfig, settings: Arc<SettingsStore>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            variable: config.variable.clone(),
            default: config.default,
            settings,
            lookup: Arc::new(lookup),
        }
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }
}

impl ThresholdSource for EnvThreshold {
    fn resolve(&self) -> Result<i64, ConfigurationError> {
        if let Some(raw) = (self.lookup)(&self.variable).filter(|v| !v.is_empty()) {
            return parse_threshold(&self.variable, &raw);
        }

        let snapshot = self.settings.snapshot();
        if let Some(err) = snapshot.load_error() {
            return Err(err.clone());
        }
        if let Some(raw) = snapshot.get(&self.variable).filter(|v| !v.is_empty()) {
            return parse_threshold(&self.variable, raw);
        }

        self.default.ok_or_else(|| ConfigurationError::Missing {
            variable: self.variable.clone(),
        })
    }
}
