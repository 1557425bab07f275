//! Request outcome classification.
//!
//! # Design Decisions
//! - Transport errors and statuses in the open range (400, 500) are failures
//! - Only 2xx is success
//! - Exactly 400, 1xx, 3xx and 5xx are unclassified: they consume budget but
//!   touch neither counters nor backoff

use thiserror::Error;

/// Connection-level failure: DNS, connect, TLS, timeout, broken body.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        Self(e.to_string())
    }
}

/// Why a request counted as failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    Transport(TransportError),
    ClientStatus(u16),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(u16),
    Failure(Failure),
    Unclassified(u16),
}

impl Outcome {
    pub fn classify(result: Result<u16, TransportError>) -> Self {
        match result {
            Err(e) => Outcome::Failure(Failure::Transport(e)),
            Ok(status) if status > 400 && status < 500 => {
                Outcome::Failure(Failure::ClientStatus(status))
            }
            Ok(status) if (200..300).contains(&status) => Outcome::Success(status),
            Ok(status) => Outcome::Unclassified(status),
        }
    }

    /// Short label used for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Success(_) => "success",
            Outcome::Failure(Failure::Transport(_)) => "transport_error",
            Outcome::Failure(Failure::ClientStatus(_)) => "client_error",
            Outcome::Unclassified(_) => "unclassified",
        }
    }
}
