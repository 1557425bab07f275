//! Per-endpoint probe loop.
//!
//! # States
//! ```text
//! Pacing → Requesting → Success      ─┐
//!                     → Failure      ─┼→ Pacing   (until max_requests)
//!                     → Unclassified ─┘
//! ```
//!
//! A recovery (success after one or more failures) closes the streak and
//! emits a `Batch`.

use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;
use tokio::time::{self, Instant};

use crate::config::{ClientConfig, EndpointConfig};
use crate::observability::metrics;
use crate::probe::outcome::{Failure, Outcome};
use crate::probe::pacer::RatePacer;
use crate::probe::transport::{HttpTransport, Transport};
use crate::probe::window::ObservationWindow;
use crate::probe::ProbeError;
use crate::resilience::BackoffState;
use crate::sink::{Batch, ErrorEvent, ErrorKind, Sink};

pub struct EndpointProbe<T> {
    name: String,
    max_requests: u64,
    pacer: RatePacer,
    backoff: BackoffState,
    transport: T,
    window: Arc<ObservationWindow>,
    sink: Arc<dyn Sink>,
}

impl EndpointProbe<HttpTransport> {
    /// Validate an endpoint's rate, URL and proxy and build its HTTP probe.
    pub fn from_config(
        endpoint: &EndpointConfig,
        client: &ClientConfig,
        window: Arc<ObservationWindow>,
        sink: Arc<dyn Sink>,
    ) -> Result<Self, ProbeError> {
        let pacer = RatePacer::parse(&endpoint.rate)?;
        let transport = HttpTransport::new(&endpoint.url, endpoint.proxy(), client)?;
        tracing::debug!(
            endpoint = %endpoint.name,
            url = %transport.url(),
            proxy = endpoint.proxy().unwrap_or("none"),
            "HTTP transport ready"
        );

        Ok(Self::new(
            endpoint.name.clone(),
            endpoint.max_requests,
            pacer,
            BackoffState::from_secs(&endpoint.error_wait_intervals),
            transport,
            window,
            sink,
        ))
    }
}

impl<T: Transport> EndpointProbe<T> {
    pub fn new(
        name: String,
        max_requests: u64,
        pacer: RatePacer,
        backoff: BackoffState,
        transport: T,
        window: Arc<ObservationWindow>,
        sink: Arc<dyn Sink>,
    ) -> Self {
        Self {
            name,
            max_requests,
            pacer,
            backoff,
            transport,
            window,
            sink,
        }
    }

    /// Drive the endpoint until its request budget is spent.
    ///
    /// Returns the number of requests issued.
    pub async fn run(mut self) -> u64 {
        let wait_time = self.pacer.wait_time();
        tracing::info!(
            endpoint = %self.name,
            rate = %self.pacer,
            wait_ms = wait_time.as_millis() as u64,
            max_requests = self.max_requests,
            "Probe starting"
        );

        let started = Instant::now();
        let mut run_started = started;
        let mut streak_started: Option<Instant> = None;
        let mut success_run = Duration::ZERO;
        let mut requests = 0u64;

        while requests < self.max_requests {
            time::sleep(wait_time).await;

            let outcome = Outcome::classify(self.transport.get().await);
            metrics::record_outcome(&self.name, outcome.label());

            match outcome {
                Outcome::Failure(failure) => {
                    let now = Instant::now();
                    self.record_failure(failure, requests == 0);

                    if streak_started.is_none() {
                        streak_started = Some(now);
                        success_run = now - run_started;
                    }
                    self.window.record_error();

                    let wait = self.backoff.on_failure();
                    if self.backoff.is_saturated() {
                        tracing::debug!(
                            endpoint = %self.name,
                            wait_ms = wait.as_millis() as u64,
                            "Backoff at its longest wait"
                        );
                    }
                    self.window.set_current_wait(wait);
                    metrics::record_backoff(&self.name, wait);

                    self.window.set_sleeping(true);
                    time::sleep(wait).await;
                    self.window.set_sleeping(false);
                }
                Outcome::Success(_) => {
                    let successes = self.window.record_success();
                    let elapsed = started.elapsed().as_secs_f64();
                    if elapsed > 0.0 {
                        self.window.set_requests_per_second(successes as f64 / elapsed);
                    }

                    self.backoff.on_success();

                    if let Some(streak_start) = streak_started.take() {
                        let now = Instant::now();
                        let streak = now - streak_start;
                        self.window.set_last_streak(streak);
                        self.emit_batch(success_run, streak);
                        run_started = now;
                    }
                }
                Outcome::Unclassified(status) => {
                    tracing::debug!(endpoint = %self.name, status, "Unclassified response");
                }
            }

            requests += 1;
            self.window.record_request();
        }

        tracing::info!(
            endpoint = %self.name,
            requests,
            successes = self.window.successes(),
            errors = self.window.errors(),
            "Probe finished"
        );
        requests
    }

    fn record_failure(&self, failure: Failure, first_request: bool) {
        if first_request {
            tracing::warn!(endpoint = %self.name, "Error on first request to endpoint");
        }

        let kind = match failure {
            Failure::Transport(e) => {
                tracing::debug!(endpoint = %self.name, error = %e, "Request failed");
                ErrorKind::Transport { message: e.0 }
            }
            Failure::ClientStatus(status) => {
                tracing::debug!(endpoint = %self.name, status, "Request rejected");
                ErrorKind::Http { status }
            }
        };

        let event = ErrorEvent {
            endpoint: self.name.clone(),
            kind,
            timestamp: Utc::now(),
        };
        if let Err(e) = self.sink.record_error(event) {
            tracing::warn!(endpoint = %self.name, error = %e, "Failed to record error event");
        }
    }

    fn emit_batch(&self, success_run: Duration, streak: Duration) {
        let (successes, failures) = self.window.take_batch_counts();
        let batch = Batch {
            endpoint: self.name.clone(),
            successes,
            success_duration: success_run,
            failures,
            failure_duration: streak,
            backoff_step: self.backoff.wait_index(),
            timestamp: Utc::now(),
        };

        tracing::info!(
            endpoint = %self.name,
            successes,
            failures,
            streak_ms = streak.as_millis() as u64,
            "Endpoint recovered"
        );
        metrics::record_batch(&self.name);

        if let Err(e) = self.sink.record_batch(batch) {
            tracing::warn!(endpoint = %self.name, error = %e, "Failed to record batch");
        }
    }
}
