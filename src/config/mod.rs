//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → OptimizerConfig (validated, immutable)
//!
//! Threshold settings file (dotenv format):
//!     threshold::settings loads it once at startup
//!     → watcher.rs detects change (when enabled)
//!     → atomic swap of the cached snapshot
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{ConfigError, load_config, load_or_default};
pub use schema::{
    ApiConfig, EndpointConfig, InventoryConfig, InventorySource, ListenerConfig,
    ObservabilityConfig, OptimizerConfig, ThresholdConfig, TimeoutConfig,
};
