//! Live per-endpoint counters.
//!
//! # Responsibilities
//! - Hold cumulative and within-streak counters for one endpoint
//! - Expose them to the reporter without locking
//!
//! Only the owning probe writes; the reporter reads with relaxed loads and
//! may see a counter bump before the matching requests-per-second update.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

#[derive(Debug)]
pub struct ObservationWindow {
    /// Endpoint name.
    pub name: String,
    /// Endpoint URL, shown next to the name.
    pub url: String,

    requests: AtomicU64,
    successes: AtomicU64,
    errors: AtomicU64,
    /// `f64` bits.
    requests_per_second: AtomicU64,
    sleeping: AtomicBool,
    current_wait_ms: AtomicU64,
    last_streak_ms: AtomicU64,

    batch_successes: AtomicU64,
    batch_errors: AtomicU64,
}

/// Point-in-time copy of a window, as rendered by the reporter.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSnapshot {
    pub name: String,
    pub url: String,
    pub requests: u64,
    pub successes: u64,
    pub errors: u64,
    pub requests_per_second: f64,
    pub sleeping: bool,
    pub current_wait: Duration,
    pub last_streak: Duration,
}

impl ObservationWindow {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            requests: AtomicU64::new(0),
            successes: AtomicU64::new(0),
            errors: AtomicU64::new(0),
            requests_per_second: AtomicU64::new(0f64.to_bits()),
            sleeping: AtomicBool::new(false),
            current_wait_ms: AtomicU64::new(0),
            last_streak_ms: AtomicU64::new(0),
            batch_successes: AtomicU64::new(0),
            batch_errors: AtomicU64::new(0),
        }
    }

    // --- Writer side (owning probe only) ---

    pub(crate) fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a success and return the new cumulative total.
    pub(crate) fn record_success(&self) -> u64 {
        self.batch_successes.fetch_add(1, Ordering::Relaxed);
        self.successes.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub(crate) fn record_error(&self) {
        self.batch_errors.fetch_add(1, Ordering::Relaxed);
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn set_requests_per_second(&self, rps: f64) {
        self.requests_per_second.store(rps.to_bits(), Ordering::Relaxed);
    }

    pub(crate) fn set_sleeping(&self, sleeping: bool) {
        self.sleeping.store(sleeping, Ordering::Relaxed);
    }

    pub(crate) fn set_current_wait(&self, wait: Duration) {
        self.current_wait_ms.store(duration_ms(wait), Ordering::Relaxed);
    }

    pub(crate) fn set_last_streak(&self, streak: Duration) {
        self.last_streak_ms.store(duration_ms(streak), Ordering::Relaxed);
    }

    /// Read and zero the within-streak counters as `(successes, errors)`.
    pub(crate) fn take_batch_counts(&self) -> (u64, u64) {
        (
            self.batch_successes.swap(0, Ordering::Relaxed),
            self.batch_errors.swap(0, Ordering::Relaxed),
        )
    }

    // --- Reader side ---

    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    pub fn successes(&self) -> u64 {
        self.successes.load(Ordering::Relaxed)
    }

    pub fn errors(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }

    pub fn requests_per_second(&self) -> f64 {
        f64::from_bits(self.requests_per_second.load(Ordering::Relaxed))
    }

    pub fn is_sleeping(&self) -> bool {
        self.sleeping.load(Ordering::Relaxed)
    }

    pub fn batch_counts(&self) -> (u64, u64) {
        (
            self.batch_successes.load(Ordering::Relaxed),
            self.batch_errors.load(Ordering::Relaxed),
        )
    }

    pub fn snapshot(&self) -> WindowSnapshot {
        WindowSnapshot {
            name: self.name.clone(),
            url: self.url.clone(),
            requests: self.requests(),
            successes: self.successes(),
            errors: self.errors(),
            requests_per_second: self.requests_per_second(),
            sleeping: self.is_sleeping(),
            current_wait: Duration::from_millis(self.current_wait_ms.load(Ordering::Relaxed)),
            last_streak: Duration::from_millis(self.last_streak_ms.load(Ordering::Relaxed)),
        }
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
