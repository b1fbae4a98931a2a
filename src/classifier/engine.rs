//! Live-count threshold classifier.

use serde::Serialize;

use crate::inventory::{Dataset, EndpointStatus};

/// Number of live endpoints in a group.
pub fn live_count(endpoints: &[EndpointStatus]) -> usize {
    endpoints.iter().filter(|e| e.is_live()).count()
}

/// Whether a group with `live` live endpoints qualifies under `threshold`.
fn qualifies(live: usize, threshold: i64) -> bool {
    // Negative thresholds exclude everything, including empty groups.
    match i64::try_from(live) {
        Ok(live) => live <= threshold,
        Err(_) => false,
    }
}

/// Names of the groups whose live endpoint count is at most `threshold`.
///
/// Each name appears once. Names are returned in lexicographic order.
pub fn classify_groups(dataset: &Dataset, threshold: i64) -> Vec<String> {
    let mut names: Vec<String> = dataset
        .groups()
        .filter(|(_, endpoints)| qualifies(live_count(endpoints), threshold))
        .map(|(name, _)| name.to_string())
        .collect();
    names.sort_unstable();
    names
}

/// Per-group view of a classification run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub name: String,
    pub endpoints: usize,
    pub live: usize,
    pub inefficient: bool,
}

/// Full classification of a dataset against one threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub threshold: i64,
    pub groups: Vec<GroupSummary>,
}

impl Classification {
    /// Classify every group in the dataset.
    pub fn evaluate(dataset: &Dataset, threshold: i64) -> Self {
        let mut groups: Vec<GroupSummary> = dataset
            .groups()
            .map(|(name, endpoints)| {
                let live = live_count(endpoints);
                GroupSummary {
                    name: name.to_string(),
                    endpoints: endpoints.len(),
                    live,
                    inefficient: qualifies(live, threshold),
                }
            })
            .collect();
        groups.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        Self { threshold, groups }
    }

    /// Names of the inefficient groups.
    pub fn inefficient(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .filter(|g| g.inefficient)
            .map(|g| g.name.as_str())
    }
}
