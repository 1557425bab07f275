//! Append-only JSON-lines sink.
//!
//! Records are encoded on the caller's task and queued to a single writer
//! task, which appends one line per record and flushes after each.

use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::sink::types::{Batch, ErrorEvent, LogLine, Record, SinkError};
use crate::sink::Sink;

pub struct JsonlSink {
    run_id: Uuid,
    tx: mpsc::UnboundedSender<String>,
}

impl JsonlSink {
    /// Open `path` for appending and start the writer task.
    ///
    /// The returned handle completes once the sink is dropped and all queued
    /// lines are written.
    pub async fn spawn(path: &Path) -> Result<(Self, JoinHandle<()>), SinkError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;

        let run_id = Uuid::new_v4();
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(write_lines(file, path.to_path_buf(), rx));

        tracing::info!(path = %path.display(), run_id = %run_id, "Recording to JSONL sink");
        Ok((Self { run_id, tx }, handle))
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    fn enqueue(&self, record: Record) -> Result<(), SinkError> {
        let mut line = serde_json::to_string(&LogLine {
            run_id: self.run_id,
            record,
        })?;
        line.push('\n');
        self.tx.send(line).map_err(|_| SinkError::Closed)
    }
}

impl Sink for JsonlSink {
    fn record_error(&self, event: ErrorEvent) -> Result<(), SinkError> {
        self.enqueue(Record::Error(event))
    }

    fn record_batch(&self, batch: Batch) -> Result<(), SinkError> {
        self.enqueue(Record::Batch(batch))
    }
}

async fn write_lines(
    mut file: tokio::fs::File,
    path: PathBuf,
    mut rx: mpsc::UnboundedReceiver<String>,
) {
    while let Some(line) = rx.recv().await {
        let written = match file.write_all(line.as_bytes()).await {
            Ok(()) => file.flush().await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            tracing::error!(path = %path.display(), error = %e, "Failed to append sink record");
        }
    }
    tracing::debug!(path = %path.display(), "JSONL sink writer stopped");
}

/// Parse a JSONL record file, skipping blank lines.
pub fn parse_lines(content: &str) -> Result<Vec<LogLine>, serde_json::Error> {
    content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(serde_json::from_str)
        .collect()
}
