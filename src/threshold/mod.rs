//! Threshold resolution subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     settings.rs loads the dotenv file once → ArcSwap snapshot
//!
//! Per request:
//!     resolver.rs
//!         → process environment
//!         → cached settings snapshot
//!         → configured default
//!     → i64 threshold or ConfigurationError
//! ```
//!
//! # Design Decisions
//! - A missing settings file is not an error; an unreadable one is reported per request
//! - Reloads swap the snapshot atomically; readers never block
//! - Resolution sits behind a trait so handlers can be tested with fixed values

pub mod resolver;
pub mod settings;

pub use resolver::{EnvThreshold, ThresholdSource, parse_threshold};
pub use settings::{SettingsSnapshot, SettingsStore};
