//! Metrics collection and exposition.
//!
//! # Metrics
//! - `optimizer_requests_total` (counter): queries by outcome
//! - `optimizer_request_duration_seconds` (histogram): query latency
//! - `optimizer_inefficient_groups` (gauge): size of the last result

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Query finished with a result list.
pub const OUTCOME_SUCCESS: &str = "success";
/// Query failed with a configuration error.
pub const OUTCOME_ERROR: &str = "error";
/// Request used a method the query does not accept.
pub const OUTCOME_REJECTED: &str = "rejected";

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one query and its latency.
pub fn record_request(outcome: &'static str, start: Instant) {
    counter!("optimizer_requests_total", "outcome" => outcome).increment(1);
    histogram!("optimizer_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

/// Count a request rejected before any work was done. No latency sample.
pub fn record_rejected() {
    counter!("optimizer_requests_total", "outcome" => OUTCOME_REJECTED).increment(1);
}

/// Record the number of groups in the last successful result.
pub fn record_inefficient_groups(count: usize) {
    gauge!("optimizer_inefficient_groups").set(count as f64);
}
