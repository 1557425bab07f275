//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Probes and reporter produce:
//!     → logging.rs (structured log events on stderr)
//!     → metrics.rs (counters and gauges per endpoint)
//!
//! Consumers:
//!     → Log aggregation (stderr, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Every event carries the endpoint name as a field
//! - Metrics are cheap (atomic increments) and off by default

pub mod logging;
pub mod metrics;
