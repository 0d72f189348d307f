//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): requests by method, status, route
//! - `relay_request_duration_seconds` (histogram): latency distribution
//! - `relay_ws_sessions_active` (gauge): open WebSocket sessions
//! - `relay_ws_frames_total` (counter): observed WebSocket frames

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(error) => tracing::error!(error = %error, "Failed to install Prometheus exporter"),
    }
}

/// Record one dispatched request.
pub fn record_request(method: &str, status: u16, route: &'static str, start: Instant) {
    metrics::counter!(
        "relay_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "route" => route
    )
    .increment(1);
    metrics::histogram!(
        "relay_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_ws_session_open() {
    metrics::gauge!("relay_ws_sessions_active").increment(1.0);
}

pub fn record_ws_session_closed() {
    metrics::gauge!("relay_ws_sessions_active").decrement(1.0);
}

pub fn record_ws_frame() {
    metrics::counter!("relay_ws_frames_total").increment(1);
}
