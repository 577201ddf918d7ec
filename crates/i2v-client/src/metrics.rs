//! Inference client metrics.
//!
//! Provides standardized metrics for monitoring calls to the inference service:
//! - Request counters by operation and status
//! - Latency histograms

use metrics::{counter, histogram};

/// Metric name constants for consistency.
pub mod names {
    /// Total inference service requests by operation and status.
    pub const REQUESTS_TOTAL: &str = "inference_requests_total";

    /// Request latency in seconds by operation.
    pub const LATENCY_SECONDS: &str = "inference_latency_seconds";
}

/// Record metrics for a completed request.
///
/// `status` is 0 when no HTTP response was received.
pub fn record_request(operation: &str, status: u16, latency_secs: f64) {
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
    .record(latency_secs);
}
