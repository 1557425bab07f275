//! Run orchestration.
//!
//! # Responsibilities
//! - Create one observation window per configured endpoint
//! - Build every probe, rejecting misconfigured endpoints individually
//! - Spawn all probes, then the reporter
//! - Wait for every probe and abandon the reporter

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

use crate::config::ProwlerConfig;
use crate::probe::{EndpointProbe, ObservationWindow};
use crate::report::Reporter;
use crate::sink::Sink;

/// How a single endpoint's probe ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Budget spent.
    Completed { requests: u64 },
    /// The endpoint's config was unusable; no request was sent.
    Rejected { reason: String },
    /// The probe task panicked.
    Aborted { reason: String },
}

#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub name: String,
    pub outcome: ProbeOutcome,
    pub window: Arc<ObservationWindow>,
}

/// Probe every configured endpoint to completion.
///
/// Reports come back in config order.
pub async fn run(config: &ProwlerConfig, sink: Arc<dyn Sink>) -> Vec<ProbeReport> {
    let windows: Vec<Arc<ObservationWindow>> = config
        .endpoints
        .iter()
        .map(|e| Arc::new(ObservationWindow::new(e.name.clone(), e.url.clone())))
        .collect();

    let mut outcomes: Vec<Option<ProbeOutcome>> = vec![None; windows.len()];
    let mut probes = JoinSet::new();

    for (i, endpoint) in config.endpoints.iter().enumerate() {
        match EndpointProbe::from_config(endpoint, &config.client, windows[i].clone(), sink.clone())
        {
            Ok(probe) => {
                probes.spawn(async move { (i, probe.run().await) });
            }
            Err(e) => {
                tracing::error!(endpoint = %endpoint.name, error = %e, "Endpoint rejected");
                outcomes[i] = Some(ProbeOutcome::Rejected {
                    reason: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        probes = probes.len(),
        rejected = outcomes.iter().filter(|o| o.is_some()).count(),
        "Probes started"
    );

    let reporter = config.reporter.enabled.then(|| {
        let interval = Duration::from_secs(config.reporter.interval_secs);
        tokio::spawn(Reporter::new(windows.clone(), interval).run())
    });

    while let Some(joined) = probes.join_next().await {
        match joined {
            Ok((i, requests)) => outcomes[i] = Some(ProbeOutcome::Completed { requests }),
            Err(e) => tracing::error!(error = %e, "Probe task failed"),
        }
    }

    if let Some(reporter) = reporter {
        reporter.abort();
    }

    config
        .endpoints
        .iter()
        .zip(windows)
        .zip(outcomes)
        .map(|((endpoint, window), outcome)| ProbeReport {
            name: endpoint.name.clone(),
            outcome: outcome.unwrap_or_else(|| ProbeOutcome::Aborted {
                reason: "probe task did not complete".to_string(),
            }),
            window,
        })
        .collect()
}
