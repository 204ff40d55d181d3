//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handlers and the upstream client produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID attached to every handler log line
//! - The API token is never a log field

pub mod logging;
pub mod metrics;
