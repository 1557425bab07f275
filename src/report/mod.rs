//! Live console reporting.
//!
//! # Data Flow
//! ```text
//! ticker (reporter.interval_secs)
//!     → snapshot every ObservationWindow (relaxed atomic loads)
//!     → one stdout line per endpoint
//!     → requests/s gauge per endpoint
//! ```
//!
//! # Design Decisions
//! - Read-only: the reporter never writes probe state
//! - Torn reads across fields are accepted; values are advisory
//! - No stop signal; the run aborts the task after the last probe

pub mod reporter;

pub use reporter::{render_line, Reporter};
