//! Metrics collection and exposition.
//!
//! # Metrics
//! - `route_requests_total` (counter): requests by method, status
//! - `route_request_duration_seconds` (histogram): latency distribution
//! - `route_decisions_total` (counter): successful picks
//! - `route_selection_errors_total` (counter): picks against an empty list
//! - `route_keys_loaded` (gauge): size of the cached route list

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with an HTTP listener on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_request(method: &str, status: u16, start: Instant) {
    counter!(
        "route_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("route_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_decision() {
    counter!("route_decisions_total").increment(1);
}

pub fn record_selection_error() {
    counter!("route_selection_errors_total").increment(1);
}

pub fn set_route_keys_loaded(count: usize) {
    gauge!("route_keys_loaded").set(count as f64);
}
