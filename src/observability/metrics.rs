//! Metrics collection and exposition.
//!
//! # Metrics
//! - `prowler_requests_total` (counter): requests by endpoint and outcome
//! - `prowler_backoff_seconds` (gauge): wait applied after the latest failure
//! - `prowler_batches_total` (counter): recoveries by endpoint
//! - `prowler_requests_per_second` (gauge): success rate, set by the reporter
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Duration;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and serve it on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_outcome(endpoint: &str, outcome: &'static str) {
    metrics::counter!(
        "prowler_requests_total",
        "endpoint" => endpoint.to_owned(),
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_backoff(endpoint: &str, wait: Duration) {
    metrics::gauge!("prowler_backoff_seconds", "endpoint" => endpoint.to_owned())
        .set(wait.as_secs_f64());
}

pub fn record_batch(endpoint: &str) {
    metrics::counter!("prowler_batches_total", "endpoint" => endpoint.to_owned()).increment(1);
}

pub fn record_requests_per_second(endpoint: &str, rps: f64) {
    metrics::gauge!("prowler_requests_per_second", "endpoint" => endpoint.to_owned()).set(rps);
}
