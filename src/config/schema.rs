//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the optimizer.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the optimizer service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Query endpoint settings.
    pub api: ApiConfig,

    /// Where the threshold comes from.
    pub threshold: ThresholdConfig,

    /// Host group inventory.
    pub inventory: InventoryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Query endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Path of the query endpoint.
    pub path: String,

    /// HTTP status sent with error payloads.
    /// 200 keeps errors distinguishable only by the payload `status` field.
    pub error_status: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            path: "/mta-hosting-optimizer".to_string(),
            error_status: 200,
        }
    }
}

/// Threshold source configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Name of the variable holding the threshold.
    pub variable: String,

    /// Optional dotenv-format settings file consulted after the environment.
    pub env_file: Option<String>,

    /// Threshold used when the variable is set nowhere.
    pub default: Option<i64>,

    /// Reload the settings file when it changes on disk.
    pub watch: bool,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            variable: "X".to_string(),
            env_file: Some(".env".to_string()),
            default: None,
            watch: false,
        }
    }
}

/// Inventory source selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InventorySource {
    /// Built-in sample groups.
    #[default]
    Sample,
    /// Groups listed under `[[inventory.endpoints]]`.
    Config,
}

/// Inventory configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct InventoryConfig {
    pub source: InventorySource,

    /// Groups that exist even without endpoints.
    pub groups: Vec<String>,

    /// Endpoint definitions.
    pub endpoints: Vec<EndpointConfig>,
}

/// A single endpoint entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointConfig {
    /// Host group this endpoint belongs to.
    pub group: String,

    /// Endpoint address (e.g., "127.0.0.1").
    pub address: String,

    /// Liveness flag (default: true).
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log format ("pretty" or "json").
    pub log_format: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
