//! Metrics collection and exposition.
//!
//! # Metrics
//! - `http_requests_total` (counter): requests by method, matched path, status
//! - `http_request_duration_seconds` (histogram): latency by method, matched path
//! - `match_counter_increments_total` (counter): successful increments by counter
//! - `matches_created_total`, `matches_deleted_total` (counters)
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; without an installed recorder they are no-ops
//! - Paths are the route template (`/api/matches/{id}`), never the raw URI

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a finished HTTP request.
pub fn record_request(method: &str, path: &str, status: u16, start: Instant) {
    metrics::counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_increment(counter: &'static str) {
    metrics::counter!("match_counter_increments_total", "counter" => counter).increment(1);
}

pub fn record_created() {
    metrics::counter!("matches_created_total").increment(1);
}

pub fn record_deleted() {
    metrics::counter!("matches_deleted_total").increment(1);
}

/// Middleware recording count and latency of every request.
pub async fn track_metrics(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    record_request(&method, &path, response.status().as_u16(), start);
    response
}
