//! Metrics collection and exposition.
//!
//! # Metrics
//! - `launch_proxy_requests_total` (counter): requests by status, outcome
//! - `launch_proxy_request_duration_seconds` (histogram): handler latency
//! - `launch_proxy_upstream_responses_total` (counter): upstream statuses
//! - `launch_proxy_rejections_total` (counter): client/config rejections by reason
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(status: u16, outcome: &'static str, start: Instant) {
    counter!(
        "launch_proxy_requests_total",
        "status" => status.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    histogram!("launch_proxy_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_upstream(status: u16) {
    counter!("launch_proxy_upstream_responses_total", "status" => status.to_string()).increment(1);
}

pub fn record_rejection(reason: &'static str) {
    counter!("launch_proxy_rejections_total", "reason" => reason).increment(1);
}
