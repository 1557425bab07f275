//! Rate Prowler library: paced per-endpoint probes that estimate the
//! practical rate limit of HTTP endpoints.

pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod probe;
pub mod report;
pub mod resilience;
pub mod sink;

pub use config::ProwlerConfig;
pub use lifecycle::{run, ProbeOutcome, ProbeReport};
pub use probe::{EndpointProbe, ObservationWindow, RatePacer};
pub use resilience::BackoffState;
pub use sink::Sink;
