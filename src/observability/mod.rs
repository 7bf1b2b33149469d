//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Host layer produces:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!     → tower_http TraceLayer (request spans)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through request spans
//! - Metrics exporter is optional

pub mod logging;
pub mod metrics;
