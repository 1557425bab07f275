//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validated config → Build probes → Spawn probes → Spawn reporter
//!
//! Completion:
//!     Every probe spends its budget → Reporter aborted → Reports returned
//! ```
//!
//! # Design Decisions
//! - No cancellation: a run ends only when every budget is spent
//! - A rejected endpoint is reported, never fatal to the run

pub mod startup;

pub use startup::{run, ProbeOutcome, ProbeReport};
