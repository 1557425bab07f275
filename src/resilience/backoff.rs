//! Escalating backoff over a configured list of wait intervals.

use std::time::Duration;

/// Cursor into an escalating sequence of failure waits.
///
/// Each consecutive failure advances one step until the sequence is
/// exhausted, after which the last reached wait repeats. A success rewinds
/// the cursor but leaves `current_wait` in place until the next failure.
#[derive(Debug, Clone)]
pub struct BackoffState {
    sequence: Vec<Duration>,
    wait_index: usize,
    current_wait: Duration,
}

impl BackoffState {
    pub fn new(sequence: Vec<Duration>) -> Self {
        Self {
            sequence,
            wait_index: 0,
            current_wait: Duration::ZERO,
        }
    }

    /// Build from a list of whole seconds, as written in endpoint configs.
    pub fn from_secs(intervals: &[u64]) -> Self {
        Self::new(intervals.iter().copied().map(Duration::from_secs).collect())
    }

    /// Advance on a failed request and return the wait to apply.
    pub fn on_failure(&mut self) -> Duration {
        if let Some(&wait) = self.sequence.get(self.wait_index) {
            self.current_wait = wait;
            self.wait_index += 1;
        }
        self.current_wait
    }

    /// Rewind the cursor after a successful request.
    pub fn on_success(&mut self) {
        if self.wait_index > 0 {
            self.wait_index = 0;
        }
    }

    pub fn wait_index(&self) -> usize {
        self.wait_index
    }

    pub fn current_wait(&self) -> Duration {
        self.current_wait
    }

    pub fn is_saturated(&self) -> bool {
        self.wait_index >= self.sequence.len()
    }
}
