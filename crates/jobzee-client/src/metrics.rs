//! Client-side request metrics.
//!
//! Recorded through the `metrics` facade; the embedding application decides
//! whether a recorder is installed.

use metrics::{counter, histogram};

/// Metric name constants for consistency.
pub mod names {
    /// Total backend requests by operation and status.
    pub const REQUESTS_TOTAL: &str = "jobzee_api_requests_total";

    /// Request latency in seconds by operation.
    pub const LATENCY_SECONDS: &str = "jobzee_api_latency_seconds";

    /// Calls answered by joining a request already in flight.
    pub const DEDUPLICATED_TOTAL: &str = "jobzee_api_deduplicated_total";
}

/// Record metrics for a completed backend request.
///
/// `status` is 0 when the request never produced an HTTP response.
pub fn record_request(operation: &str, status: u16, latency_ms: f64) {
    counter!(
        names::REQUESTS_TOTAL,
        "operation" => operation.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        names::LATENCY_SECONDS,
        "operation" => operation.to_string()
    )
    .record(latency_ms / 1000.0);
}

/// Record a call that joined an in-flight request.
pub fn record_deduplicated(operation: &str) {
    counter!(
        names::DEDUPLICATED_TOTAL,
        "operation" => operation.to_string()
    )
    .increment(1);
}
