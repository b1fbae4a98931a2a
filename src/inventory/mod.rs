//! Inventory subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     InventoryConfig (source = sample | config)
//!     → loader.rs (build groups, validate identifiers)
//!     → dataset.rs (Dataset, frozen)
//!     → shared via Arc with the HTTP handlers
//! ```
//!
//! # Design Decisions
//! - Built once, read-only afterwards; no locks on the read path
//! - A group with no endpoints is a valid entry
//! - Loader failure is fatal to startup

pub mod dataset;
pub mod loader;

pub use dataset::{Dataset, EndpointStatus};
pub use loader::{ConfigLoader, DatasetError, DatasetLoader, SampleLoader, loader_for};
