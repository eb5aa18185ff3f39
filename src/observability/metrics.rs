//! Metrics collection and exposition.
//!
//! # Metrics
//! - `nasa_proxy_upstream_requests_total` (counter): upstream calls by route, outcome
//! - `nasa_proxy_upstream_duration_seconds` (histogram): upstream call latency by route
//! - `nasa_proxy_rejected_requests_total` (counter): requests refused before any upstream call
//!
//! # Design Decisions
//! - Low-overhead metric updates through the `metrics` facade
//! - Labels are static strings (route name, outcome)

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Result of one upstream call, as recorded in metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    NoResults,
    Error,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::NoResults => "no_results",
            Outcome::Error => "error",
        }
    }
}

/// Install the Prometheus recorder and its HTTP scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one completed upstream call.
pub fn record_upstream(route: &'static str, outcome: Outcome, start: Instant) {
    metrics::counter!(
        "nasa_proxy_upstream_requests_total",
        "route" => route,
        "outcome" => outcome.as_str()
    )
    .increment(1);
    metrics::histogram!("nasa_proxy_upstream_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record a request refused for missing input.
pub fn record_rejected(route: &'static str) {
    metrics::counter!("nasa_proxy_rejected_requests_total", "route" => route).increment(1);
}
