//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML or JSON.
//! Endpoint fields also accept their camelCase spellings so older JSON
//! configs (`{"testers": [{"maxRequests": ...}]}`) load unchanged.

use serde::{Deserialize, Serialize};

/// Root configuration for a prowl run.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProwlerConfig {
    /// Endpoints to probe, one probe each.
    #[serde(alias = "testers", alias = "Testers")]
    pub endpoints: Vec<EndpointConfig>,

    /// HTTP client settings shared by every probe.
    pub client: ClientConfig,

    /// Console reporter settings.
    pub reporter: ReporterConfig,

    /// Where batches and error events are recorded.
    pub sink: SinkConfig,

    /// Logging and metrics.
    pub observability: ObservabilityConfig,
}

/// A single endpoint to probe.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointConfig {
    /// Unique endpoint identifier for logs and records.
    pub name: String,

    /// Target URL, requested with GET.
    pub url: String,

    /// Pacing as `<count><s|m|h>`, e.g. `"10s"` or `"300m"`.
    pub rate: String,

    /// Total requests to issue before the probe stops.
    #[serde(alias = "maxRequests")]
    pub max_requests: u64,

    /// Optional HTTP/HTTPS proxy URL. Empty means none.
    #[serde(default)]
    pub proxy: Option<String>,

    /// Escalating waits (seconds) applied after consecutive failures.
    #[serde(default, alias = "errorWaitIntervals")]
    pub error_wait_intervals: Vec<u64>,
}

impl EndpointConfig {
    /// The configured proxy, treating an empty string as unset.
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref().filter(|p| !p.trim().is_empty())
    }
}

/// HTTP client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Whole-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Connection establishment (TCP + TLS handshake) timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 5,
            connect_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReporterConfig {
    /// Print live per-endpoint lines to stdout.
    pub enabled: bool,

    /// Seconds between report ticks.
    pub interval_secs: u64,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Append-only JSON-lines file.
    #[default]
    Jsonl,
    /// Discard records.
    None,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SinkConfig {
    pub kind: SinkKind,

    /// Record file for the `jsonl` sink.
    pub path: String,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            kind: SinkKind::Jsonl,
            path: "rateprowler.jsonl".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins if set.
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
