//! Metrics collection and exposition.
//!
//! # Metrics
//! - `tasks_requests_total` (counter): requests by method, route, status
//! - `tasks_request_duration_seconds` (histogram): latency by route
//!
//! # Design Decisions
//! - Recording is always on; without an installed recorder it is a no-op
//! - Prometheus exporter is opt-in via config

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape listener on `addr`.
///
/// Must be called from within a tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one finished request.
pub fn record_request(method: &str, route: &'static str, status: u16, start: Instant) {
    counter!(
        "tasks_requests_total",
        "method" => method.to_string(),
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);

    histogram!("tasks_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}
