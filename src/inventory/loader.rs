//! Dataset loaders.
//!
//! # Responsibilities
//! - Build the inventory from the built-in sample or from configuration
//! - Reject entries that cannot be keyed (empty group or identifier)

use thiserror::Error;

use crate::config::{EndpointConfig, InventoryConfig, InventorySource};
use crate::inventory::dataset::{Dataset, EndpointStatus};

/// Errors raised while building the dataset.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DatasetError {
    /// An endpoint entry has no group name.
    #[error("endpoint '{identifier}' has an empty group name")]
    EmptyGroupName { identifier: String },

    /// A listed group name is blank.
    #[error("inventory group #{index} has an empty name")]
    EmptyListedGroup { index: usize },

    /// An endpoint entry has no identifier.
    #[error("group '{group}' contains an endpoint with an empty identifier")]
    EmptyIdentifier { group: String },
}

/// Source of the startup inventory.
pub trait DatasetLoader: Send + Sync {
    /// Build the dataset. Called once during startup.
    fn load(&self) -> Result<Dataset, DatasetError>;
}

/// The built-in sample inventory of three production MTA groups.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleLoader;

const SAMPLE_ENDPOINTS: [(&str, &str, bool); 6] = [
    ("mta-prod-1", "127.0.0.1", true),
    ("mta-prod-1", "127.0.0.2", false),
    ("mta-prod-2", "127.0.0.3", true),
    ("mta-prod-2", "127.0.0.4", true),
    ("mta-prod-2", "127.0.0.5", false),
    ("mta-prod-3", "127.0.0.6", false),
];

impl DatasetLoader for SampleLoader {
    fn load(&self) -> Result<Dataset, DatasetError> {
        Ok(SAMPLE_ENDPOINTS
            .iter()
            .map(|&(group, ip, active)| (group, EndpointStatus::new(ip, active)))
            .collect())
    }
}

/// Builds the inventory from `[[inventory.endpoints]]` entries.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    groups: Vec<String>,
    endpoints: Vec<EndpointConfig>,
}

impl ConfigLoader {
    pub fn new(groups: Vec<String>, endpoints: Vec<EndpointConfig>) -> Self {
        Self { groups, endpoints }
    }
}

impl DatasetLoader for ConfigLoader {
    fn load(&self) -> Result<Dataset, DatasetError> {
        let mut dataset = Dataset::new();

        for (index, group) in self.groups.iter().enumerate() {
            let group = group.trim();
            if group.is_empty() {
                return Err(DatasetError::EmptyListedGroup { index });
            }
            dataset.ensure_group(group);
        }

        for entry in &self.endpoints {
            let group = entry.group.trim();
            let address = entry.address.trim();
            if group.is_empty() {
                return Err(DatasetError::EmptyGroupName {
                    identifier: address.to_string(),
                });
            }
            if address.is_empty() {
                return Err(DatasetError::EmptyIdentifier {
                    group: group.to_string(),
                });
            }
            dataset.push(group, EndpointStatus::new(address, entry.active));
        }

        Ok(dataset)
    }
}

/// Pick the loader matching the configured inventory source.
pub fn loader_for(config: &InventoryConfig) -> Box<dyn DatasetLoader> {
    match config.source {
        InventorySource::Sample => Box::new(SampleLoader),
        InventorySource::Config => Box::new(ConfigLoader::new(
            config.groups.clone(),
            config.endpoints.clone(),
        )),
    }
}
