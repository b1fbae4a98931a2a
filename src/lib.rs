//! MTA Hosting Optimizer Library
//!
//! Reports host groups that run with at most a threshold number of live
//! endpoints, so they can be consolidated.

pub mod classifier;
pub mod config;
pub mod error;
pub mod http;
pub mod inventory;
pub mod lifecycle;
pub mod observability;
pub mod threshold;

pub use classifier::classify_groups;
pub use config::OptimizerConfig;
pub use error::{ConfigurationError, ErrorKind};
pub use http::HttpServer;
pub use inventory::{Dataset, EndpointStatus};
pub use lifecycle::{Service, Shutdown};
