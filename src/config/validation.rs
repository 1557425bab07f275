//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject configs no probe could run from: no endpoints, clashing names
//! - Validate value ranges (timeouts > 0, reporter interval > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Rate, URL and proxy syntax are per-endpoint concerns checked when each
//!   probe is built, so one bad endpoint never blocks the rest

use std::collections::HashSet;
use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::ProwlerConfig;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no endpoints configured")]
    NoEndpoints,

    #[error("endpoint #{0} has an empty name")]
    EmptyName(usize),

    #[error("duplicate endpoint name {0:?}")]
    DuplicateName(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("invalid metrics address {0:?}")]
    MetricsAddress(String),
}

pub fn validate_config(config: &ProwlerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.endpoints.is_empty() {
        errors.push(ValidationError::NoEndpoints);
    }

    let mut seen = HashSet::new();
    for (i, endpoint) in config.endpoints.iter().enumerate() {
        if endpoint.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName(i));
        } else if !seen.insert(endpoint.name.as_str()) {
            errors.push(ValidationError::DuplicateName(endpoint.name.clone()));
        }
    }

    if config.client.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero("client.request_timeout_secs"));
    }
    if config.client.connect_timeout_secs == 0 {
        errors.push(ValidationError::Zero("client.connect_timeout_secs"));
    }
    if config.reporter.enabled && config.reporter.interval_secs == 0 {
        errors.push(ValidationError::Zero("reporter.interval_secs"));
    }

    let obs = &config.observability;
    if obs.metrics_enabled && obs.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::MetricsAddress(obs.metrics_address.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
