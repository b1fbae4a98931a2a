//! In-memory host group inventory.
//!
//! # Responsibilities
//! - Represent a single endpoint and its liveness flag
//! - Map group names to their ordered endpoint lists
//! - Stay immutable once handed to the server

use std::collections::HashMap;

use serde::Serialize;

/// A single endpoint inside a host group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointStatus {
    identifier: String,
    is_live: bool,
}

impl EndpointStatus {
    /// Create a new endpoint status.
    pub fn new(identifier: impl Into<String>, is_live: bool) -> Self {
        Self {
            identifier: identifier.into(),
            is_live,
        }
    }

    /// Endpoint identifier (usually an IP address).
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Whether the endpoint is currently active.
    pub fn is_live(&self) -> bool {
        self.is_live
    }
}

/// Mapping of group name to its endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    groups: HashMap<String, Vec<EndpointStatus>>,
}

impl Dataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an endpoint to a group, creating the group if needed.
    pub fn push(&mut self, group: impl Into<String>, endpoint: EndpointStatus) {
        self.groups.entry(group.into()).or_default().push(endpoint);
    }

    /// Register a group, keeping any endpoints it already has.
    pub fn ensure_group(&mut self, group: impl Into<String>) {
        self.groups.entry(group.into()).or_default();
    }

    /// Endpoints of a group, in insertion order.
    pub fn get(&self, group: &str) -> Option<&[EndpointStatus]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    /// Iterate over every group and its endpoints.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[EndpointStatus])> {
        self.groups
            .iter()
            .map(|(name, endpoints)| (name.as_str(), endpoints.as_slice()))
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of endpoints across all groups.
    pub fn endpoint_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

impl<G: Into<String>> FromIterator<(G, EndpointStatus)> for Dataset {
    fn from_iter<I: IntoIterator<Item = (G, EndpointStatus)>>(iter: I) -> Self {
        let mut dataset = Dataset::new();
        for (group, endpoint) in iter {
            dataset.push(group, endpoint);
        }
        dataset
    }
}
