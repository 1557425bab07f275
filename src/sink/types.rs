//! Records handed to a sink.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// One recovery: the success run and the failure streak before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub endpoint: String,
    pub successes: u64,
    #[serde(rename = "success_duration_ms", with = "millis")]
    pub success_duration: Duration,
    pub failures: u64,
    #[serde(rename = "failure_duration_ms", with = "millis")]
    pub failure_duration: Duration,
    /// Backoff cursor when the batch was built. The cursor has already been
    /// rewound by the recovering success, so this reads 0.
    pub backoff_step: usize,
    pub timestamp: DateTime<Utc>,
}

/// How a failed request failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorKind {
    Transport { message: String },
    Http { status: u16 },
}

impl ErrorKind {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::Transport { .. } => "transport",
            ErrorKind::Http { .. } => "http",
        }
    }
}

/// One failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEvent {
    pub endpoint: String,
    #[serde(flatten)]
    pub kind: ErrorKind,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "record", rename_all = "snake_case")]
pub enum Record {
    Batch(Batch),
    Error(ErrorEvent),
}

/// A record as written to an append-only log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogLine {
    pub run_id: Uuid,
    #[serde(flatten)]
    pub record: Record,
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("sink writer has stopped")]
    Closed,
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_line_shape() {
        let line = LogLine {
            run_id: Uuid::nil(),
            record: Record::Error(ErrorEvent {
                endpoint: "api".into(),
                kind: ErrorKind::Http { status: 429 },
                timestamp: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            }),
        };

        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(
            value,
            json!({
                "run_id": "00000000-0000-0000-0000-000000000000",
                "record": "error",
                "endpoint": "api",
                "kind": "http",
                "status": 429,
                "timestamp": "2023-11-14T22:13:20Z",
            })
        );
    }

    #[test]
    fn test_batch_durations_in_millis() {
        let batch = Batch {
            endpoint: "api".into(),
            successes: 4,
            success_duration: Duration::from_millis(2500),
            failures: 3,
            failure_duration: Duration::from_secs(7),
            backoff_step: 0,
            timestamp: DateTime::from_timestamp(0, 0).unwrap(),
        };

        let value = serde_json::to_value(Record::Batch(batch.clone())).unwrap();
        assert_eq!(value["record"], "batch");
        assert_eq!(value["success_duration_ms"], 2500);
        assert_eq!(value["failure_duration_ms"], 7000);

        let back: Record = serde_json::from_value(value).unwrap();
        assert_eq!(back, Record::Batch(batch));
    }
}
