//! Persistence of observations.
//!
//! # Data Flow
//! ```text
//! Probe failure  → ErrorEvent ─┐
//!                              ├→ Sink::record_* → jsonl.rs (append-only file)
//! Probe recovery → Batch ──────┘                 → NullSink (debug log only)
//!                                                → MemorySink (tests, embedding)
//! ```
//!
//! # Design Decisions
//! - Recording never blocks a probe on disk I/O
//! - A failed write is the caller's to log; it never stops the probe
//! - The trait is object safe so one `Arc<dyn Sink>` serves every probe

pub mod jsonl;
pub mod types;

use std::sync::Mutex;

pub use jsonl::JsonlSink;
pub use types::{Batch, ErrorEvent, ErrorKind, LogLine, Record, SinkError};

/// Durable recording of batches and error events.
pub trait Sink: Send + Sync {
    fn record_error(&self, event: ErrorEvent) -> Result<(), SinkError>;
    fn record_batch(&self, batch: Batch) -> Result<(), SinkError>;
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct NullSink;

impl Sink for NullSink {
    fn record_error(&self, event: ErrorEvent) -> Result<(), SinkError> {
        tracing::debug!(endpoint = %event.endpoint, kind = event.kind.label(), "Discarding error event");
        Ok(())
    }

    fn record_batch(&self, batch: Batch) -> Result<(), SinkError> {
        tracing::debug!(endpoint = %batch.endpoint, failures = batch.failures, "Discarding batch");
        Ok(())
    }
}

/// Keeps records in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Record>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Record> {
        self.records.lock().expect("memory sink mutex poisoned").clone()
    }

    pub fn batches(&self) -> Vec<Batch> {
        self.records()
            .into_iter()
            .filter_map(|r| match r {
                Record::Batch(b) => Some(b),
                Record::Error(_) => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<ErrorEvent> {
        self.records()
            .into_iter()
            .filter_map(|r| match r {
                Record::Error(e) => Some(e),
                Record::Batch(_) => None,
            })
            .collect()
    }

    fn push(&self, record: Record) {
        self.records.lock().expect("memory sink mutex poisoned").push(record);
    }
}

impl Sink for MemorySink {
    fn record_error(&self, event: ErrorEvent) -> Result<(), SinkError> {
        self.push(Record::Error(event));
        Ok(())
    }

    fn record_batch(&self, batch: Batch) -> Result<(), SinkError> {
        self.push(Record::Batch(batch));
        Ok(())
    }
}
