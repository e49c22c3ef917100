//! Prometheus metrics for request latency and collection activity.
//!
//! This module provides metrics for:
//! - HTTP request latency and counts per route
//! - Candidates created, updated and deleted
//! - Current collection size

use std::time::Instant;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// HTTP requests counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// Candidates created counter metric name.
pub const METRIC_CANDIDATES_CREATED: &str = "candidates_created_total";
/// Candidates updated counter metric name.
pub const METRIC_CANDIDATES_UPDATED: &str = "candidates_updated_total";
/// Candidates deleted counter metric name.
pub const METRIC_CANDIDATES_DELETED: &str = "candidates_deleted_total";
/// Collection size gauge metric name.
pub const METRIC_CANDIDATES_STORED: &str = "candidates_stored";

/// Install the Prometheus recorder and describe all metrics.
/// Call this once at startup; the handle renders the `/metrics` page.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    describe_metrics();
    Ok(handle)
}

/// Register metric descriptions with the installed recorder.
pub fn describe_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );
    describe_counter!(METRIC_HTTP_REQUESTS, "Total number of HTTP requests served");
    describe_counter!(
        METRIC_CANDIDATES_CREATED,
        "Total number of candidates created"
    );
    describe_counter!(
        METRIC_CANDIDATES_UPDATED,
        "Total number of candidate updates"
    );
    describe_counter!(
        METRIC_CANDIDATES_DELETED,
        "Total number of candidates deleted"
    );
    describe_gauge!(METRIC_CANDIDATES_STORED, "Number of candidates currently held");

    debug!("Metrics initialized");
}

/// Record HTTP request latency and count.
pub fn record_http_request(start: Instant, method: &str, endpoint: &str, status: u16) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "method" => method.to_string(),
        "endpoint" => endpoint.to_string()
    )
    .record(latency_ms);
    counter!(
        METRIC_HTTP_REQUESTS,
        "method" => method.to_string(),
        "endpoint" => endpoint.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Increment candidates created counter.
pub fn inc_candidates_created() {
    counter!(METRIC_CANDIDATES_CREATED).increment(1);
}

/// Increment candidates updated counter.
pub fn inc_candidates_updated() {
    counter!(METRIC_CANDIDATES_UPDATED).increment(1);
}

/// Increment candidates deleted counter.
pub fn inc_candidates_deleted() {
    counter!(METRIC_CANDIDATES_DELETED).increment(1);
}

/// Set the collection size gauge.
pub fn set_candidates_stored(count: usize) {
    gauge!(METRIC_CANDIDATES_STORED).set(count as f64);
}
