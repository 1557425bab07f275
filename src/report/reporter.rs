//! Periodic console report of every observation window.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use chrono::{DateTime, Local, TimeZone};
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::observability::metrics;
use crate::probe::{ObservationWindow, WindowSnapshot};

pub struct Reporter {
    windows: Vec<Arc<ObservationWindow>>,
    interval: Duration,
}

impl Reporter {
    pub fn new(windows: Vec<Arc<ObservationWindow>>, interval: Duration) -> Self {
        Self { windows, interval }
    }

    /// Print one line per endpoint every interval. Only returns if stdout
    /// stops accepting writes; otherwise the caller aborts the task once the
    /// probes are done.
    pub async fn run(self) {
        tracing::debug!(
            endpoints = self.windows.len(),
            interval_ms = self.interval.as_millis() as u64,
            "Reporter starting"
        );

        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let lines = self.render(Local::now());
            let written = write_report(&mut io::stdout().lock(), &lines);
            if let Err(e) = written {
                tracing::warn!(error = %e, "Report output closed, reporter stopping");
                return;
            }
        }
    }

    /// Render the current state of every window.
    pub fn render<Tz: TimeZone>(&self, now: DateTime<Tz>) -> Vec<String>
    where
        Tz::Offset: std::fmt::Display,
    {
        self.windows
            .iter()
            .map(|window| {
                let snapshot = window.snapshot();
                metrics::record_requests_per_second(&snapshot.name, snapshot.requests_per_second);
                render_line(&snapshot, &now)
            })
            .collect()
    }
}

/// Write one report line per window and flush.
pub fn write_report<W: Write>(out: &mut W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

/// `[timestamp] name (url): successes, errors, rps, sleeping, wait, last streak`
pub fn render_line<Tz: TimeZone>(snapshot: &WindowSnapshot, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "[{}] {} ({}): {} successful, {} errors, {:.2} requests/s, sleeping: {}, error wait: {:?}, last streak: {:?}",
        now.format("%Y-%m-%d %H:%M:%S"),
        snapshot.name,
        snapshot.url,
        snapshot.successes,
        snapshot.errors,
        snapshot.requests_per_second,
        snapshot.sleeping,
        snapshot.current_wait,
        snapshot.last_streak,
    )
}
