//! Rate Prowler
//!
//! Estimates the practical rate limit of HTTP endpoints by driving each one
//! with its own paced probe.
//!
//! # Architecture Overview
//!
//! ```text
//!   config file ──▶ config ──▶ lifecycle::run
//!                                  │
//!          ┌───────────────────────┼───────────────────────┐
//!          ▼                       ▼                       ▼
//!   ┌─────────────┐         ┌─────────────┐         ┌─────────────┐
//!   │ probe (a)   │         │ probe (b)   │   ...   │  reporter   │
//!   │ pace → GET  │         │ pace → GET  │         │ 1 line per  │
//!   │ → classify  │         │ → classify  │         │ endpoint    │
//!   │ → backoff   │         │ → backoff   │         │ per tick    │
//!   └──┬──────┬───┘         └──┬──────┬───┘         └──────▲──────┘
//!      │      │ writes         │      │                    │ reads
//!      │      └──▶ window (a) ─┼──────┼────────────────────┤
//!      │                       │      └──▶ window (b) ─────┘
//!      ▼                       ▼
//!   ┌──────────────────────────────┐
//!   │ sink: error events, batches  │
//!   └──────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use clap::Parser;

use rate_prowler::config::{load_config, SinkKind};
use rate_prowler::observability::{logging, metrics};
use rate_prowler::sink::{JsonlSink, NullSink, Sink};
use rate_prowler::{run, ProbeOutcome};

#[derive(Parser)]
#[command(name = "rate-prowler")]
#[command(about = "Estimate the practical rate limit of HTTP endpoints", long_about = None)]
struct Cli {
    /// Path to the configuration file (TOML, or JSON with a .json extension).
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the configured log level.
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error loading configuration {}: {}", cli.config.display(), e);
            std::process::exit(1);
        }
    };
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }

    logging::init_logging(&config.observability);
    tracing::info!(
        config = %cli.config.display(),
        endpoints = config.endpoints.len(),
        sink = ?config.sink.kind,
        "rate-prowler v0.1.0 starting"
    );

    if config.observability.metrics_enabled {
        // Validated at load.
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let mut writer = None;
    let sink: Arc<dyn Sink> = match config.sink.kind {
        SinkKind::Jsonl => {
            let (sink, handle) = JsonlSink::spawn(Path::new(&config.sink.path)).await?;
            writer = Some(handle);
            Arc::new(sink)
        }
        SinkKind::None => Arc::new(NullSink),
    };

    let reports = run(&config, sink).await;

    // Every probe has dropped its sink handle, so the writer drains and stops.
    if let Some(writer) = writer {
        writer.await?;
    }

    for report in &reports {
        match &report.outcome {
            ProbeOutcome::Completed { requests } => tracing::info!(
                endpoint = %report.name,
                requests,
                successes = report.window.successes(),
                errors = report.window.errors(),
                "Endpoint complete"
            ),
            ProbeOutcome::Rejected { reason } | ProbeOutcome::Aborted { reason } => {
                tracing::warn!(endpoint = %report.name, reason = %reason, "Endpoint not probed")
            }
        }
    }

    tracing::info!("Run complete");
    Ok(())
}
