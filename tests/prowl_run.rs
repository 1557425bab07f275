//! End-to-end runs against mock HTTP backends.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rate_prowler::config::ProwlerConfig;
use rate_prowler::sink::jsonl::parse_lines;
use rate_prowler::sink::{ErrorKind, JsonlSink, MemorySink, Record};
use rate_prowler::{run, ProbeOutcome};

mod common;

fn quiet_config() -> ProwlerConfig {
    let mut config = ProwlerConfig::default();
    config.reporter.enabled = false;
    config
}

#[tokio::test]
async fn test_status_400_spends_budget_without_counting() {
    let (addr, calls) = common::start_fixed_backend(400).await;
    let mut config = quiet_config();
    config.endpoints.push(common::endpoint("boundary", addr, "1000s", 5));

    let sink = Arc::new(MemorySink::new());
    let reports = run(&config, sink.clone()).await;

    assert_eq!(reports[0].outcome, ProbeOutcome::Completed { requests: 5 });
    assert_eq!(calls.load(Ordering::SeqCst), 5);
    assert_eq!(reports[0].window.successes(), 0);
    assert_eq!(reports[0].window.errors(), 0);
    assert!(sink.records().is_empty());
}

#[tokio::test]
async fn test_endpoints_finish_independently() {
    let (fast_addr, fast_calls) = common::start_fixed_backend(200).await;
    let (slow_addr, slow_calls) = common::start_fixed_backend(200).await;

    let mut config = quiet_config();
    config.endpoints.push(common::endpoint("fast", fast_addr, "1000s", 3));
    config.endpoints.push(common::endpoint("slow", slow_addr, "20s", 8));

    let start = Instant::now();
    let reports = run(&config, Arc::new(MemorySink::new())).await;

    // The slow endpoint paces 50ms before each of its 8 requests.
    assert!(start.elapsed() >= Duration::from_millis(400));
    assert_eq!(reports[0].outcome, ProbeOutcome::Completed { requests: 3 });
    assert_eq!(reports[1].outcome, ProbeOutcome::Completed { requests: 8 });
    assert_eq!(fast_calls.load(Ordering::SeqCst), 3);
    assert_eq!(slow_calls.load(Ordering::SeqCst), 8);
    assert_eq!(reports[1].window.successes(), 8);
    assert!(reports[1].window.requests_per_second() > 0.0);
}

#[tokio::test]
async fn test_rate_limited_endpoint_recovers_into_one_batch() {
    let (addr, _calls) =
        common::start_programmable_backend(|n| if n < 3 { 429 } else { 200 }).await;

    let mut config = quiet_config();
    config.endpoints.push(common::endpoint("limited", addr, "1000s", 6));

    let sink = Arc::new(MemorySink::new());
    let reports = run(&config, sink.clone()).await;

    assert_eq!(reports[0].outcome, ProbeOutcome::Completed { requests: 6 });
    assert_eq!(reports[0].window.errors(), 3);
    assert_eq!(reports[0].window.successes(), 3);

    let batches = sink.batches();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].endpoint, "limited");
    assert_eq!(batches[0].failures, 3);
    assert_eq!(batches[0].successes, 1);
    assert_eq!(batches[0].backoff_step, 0);

    let errors = sink.errors();
    assert_eq!(errors.len(), 3);
    assert!(errors.iter().all(|e| e.kind == ErrorKind::Http { status: 429 }));
}

#[tokio::test]
async fn test_transport_failures_recorded_to_jsonl() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.jsonl");
    let addr = common::closed_addr().await;

    let mut config = quiet_config();
    config.endpoints.push(common::endpoint("down", addr, "1000s", 2));

    let (sink, writer) = JsonlSink::spawn(&path).await.unwrap();
    let run_id = sink.run_id();
    let reports = run(&config, Arc::new(sink)).await;
    writer.await.unwrap();

    assert_eq!(reports[0].outcome, ProbeOutcome::Completed { requests: 2 });
    assert_eq!(reports[0].window.errors(), 2);

    let lines = parse_lines(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(lines.len(), 2);
    for line in lines {
        assert_eq!(line.run_id, run_id);
        let Record::Error(event) = line.record else {
            panic!("expected error record");
        };
        assert_eq!(event.endpoint, "down");
        assert!(matches!(event.kind, ErrorKind::Transport { .. }));
    }
}

#[tokio::test]
async fn test_rejected_endpoint_does_not_block_others() {
    let (addr, calls) = common::start_fixed_backend(200).await;

    let mut config = quiet_config();
    config.endpoints.push(common::endpoint("broken", addr, "fast", 10));
    config.endpoints.push(common::endpoint("fine", addr, "1000s", 4));

    let reports = run(&config, Arc::new(MemorySink::new())).await;

    assert!(matches!(reports[0].outcome, ProbeOutcome::Rejected { .. }));
    assert_eq!(reports[1].outcome, ProbeOutcome::Completed { requests: 4 });
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_run_returns_with_reporter_enabled() {
    let (addr, _calls) = common::start_fixed_backend(200).await;

    let mut config = ProwlerConfig::default();
    config.reporter.interval_secs = 1;
    config.endpoints.push(common::endpoint("reported", addr, "4s", 6));

    let reports = tokio::time::timeout(
        Duration::from_secs(10),
        run(&config, Arc::new(MemorySink::new())),
    )
    .await
    .expect("run should finish once probes are done");

    assert_eq!(reports[0].outcome, ProbeOutcome::Completed { requests: 6 });
    assert_eq!(reports[0].window.successes(), 6);
}

#[tokio::test]
async fn test_requests_route_through_configured_proxy() {
    let (proxy_addr, proxy_calls) = common::start_fixed_backend(200).await;
    let target = common::closed_addr().await;

    let mut config = quiet_config();
    let mut endpoint = common::endpoint("proxied", target, "1000s", 3);
    endpoint.proxy = Some(format!("http://{proxy_addr}"));
    config.endpoints.push(endpoint);

    let reports = run(&config, Arc::new(MemorySink::new())).await;

    assert_eq!(reports[0].outcome, ProbeOutcome::Completed { requests: 3 });
    assert_eq!(proxy_calls.load(Ordering::SeqCst), 3);
    assert_eq!(reports[0].window.successes(), 3);
    assert_eq!(reports[0].window.errors(), 0);
}
