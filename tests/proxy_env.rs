//! Environment proxy variables must not reroute endpoints without a proxy.
//!
//! Kept in its own test binary since it mutates the process environment.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use rate_prowler::config::ProwlerConfig;
use rate_prowler::sink::MemorySink;
use rate_prowler::{run, ProbeOutcome};

mod common;

#[tokio::test]
async fn test_environment_proxy_is_ignored_without_explicit_proxy() {
    let bogus = common::closed_addr().await;
    for var in ["HTTP_PROXY", "http_proxy", "ALL_PROXY", "all_proxy"] {
        std::env::set_var(var, format!("http://{bogus}"));
    }
    for var in ["NO_PROXY", "no_proxy"] {
        std::env::remove_var(var);
    }

    let (addr, calls) = common::start_fixed_backend(200).await;
    let mut config = ProwlerConfig::default();
    config.reporter.enabled = false;
    config.endpoints.push(common::endpoint("direct", addr, "1000s", 3));

    let reports = run(&config, Arc::new(MemorySink::new())).await;

    assert_eq!(reports[0].outcome, ProbeOutcome::Completed { requests: 3 });
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(reports[0].window.successes(), 3);
}
