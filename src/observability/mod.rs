//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP layer, forwarder:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters, histograms via `metrics`)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every log line via the trace span
//! - Metrics are recorded unconditionally; without an installed recorder
//!   they are no-ops
//! - Upstream error detail is logged, never returned to clients

pub mod logging;
pub mod metrics;
