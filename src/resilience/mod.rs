//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to endpoint fails:
//!     → backoff.rs (pick the next wait from the configured intervals)
//!     → probe sleeps for that wait before pacing again
//!
//! Request to endpoint succeeds:
//!     → backoff.rs (rewind to the first interval)
//! ```
//!
//! # Design Decisions
//! - Intervals come straight from config; no jitter, no multiplier
//! - Escalation saturates on the last interval instead of erroring
//! - Rewinding on success does not clear the last applied wait

pub mod backoff;

pub use backoff::BackoffState;
