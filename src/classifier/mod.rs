//! Group classification.
//!
//! # Data Flow
//! ```text
//! Dataset + threshold T
//!     → engine.rs (count live endpoints per group)
//!     → groups with live_count <= T
//! ```
//!
//! # Design Decisions
//! - Pure and total: no I/O, no errors, no mutation
//! - Output sorted by name so repeated calls render identically

pub mod engine;

pub use engine::{Classification, GroupSummary, classify_groups, live_count};
