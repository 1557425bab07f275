//! Endpoint probing subsystem.
//!
//! # Data Flow
//! ```text
//! EndpointConfig
//!     → pacer.rs (rate expression → fixed delay)
//!     → transport.rs (HTTP client: proxy, timeouts)
//!     → runner.rs (paced loop)
//!         → outcome.rs (success / failure / unclassified)
//!         → window.rs (live counters, read by the reporter)
//!         → resilience::backoff (wait after failures)
//!         → sink (error events, recovery batches)
//! ```
//!
//! # Design Decisions
//! - One probe per endpoint, no shared state between probes
//! - Requests within a probe never overlap
//! - A misconfigured endpoint is rejected alone; the others still run

pub mod outcome;
pub mod pacer;
pub mod runner;
pub mod transport;
pub mod window;

use thiserror::Error;

pub use outcome::{Failure, Outcome, TransportError};
pub use pacer::{RateError, RatePacer};
pub use runner::EndpointProbe;
pub use transport::{HttpTransport, Transport};
pub use window::{ObservationWindow, WindowSnapshot};

/// Reasons an endpoint's probe could not be built.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error(transparent)]
    Rate(#[from] RateError),

    #[error("invalid endpoint URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid proxy {proxy:?}: {source}")]
    InvalidProxy {
        proxy: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
