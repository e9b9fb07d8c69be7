use super::*;
use crate::config::{BatchStep, ConfigFile, JobStep, OutputPaths, RateSpec, TimelineStep};
use crate::models::BrokerConfig;
use crate::tests::fake_emitter::FakeEmitter;
use crate::utils::AnalyzeError;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tempfile::TempDir;

fn simple_params() -> SimpleExperiment {
    SimpleExperiment {
        source_brokers: "source:9092".to_string(),
        dest_brokers: "dest:9092".to_string(),
        consumer_group: "bench".to_string(),
        source_topic: "in".to_string(),
        dest_topic: "out".to_string(),
        message_timeout: "10s".to_string(),
        ssl: true,
        messages_number: 1000,
        message_size: "1KiB".to_string(),
        wait: Duration::ZERO,
        consumers_wait: Duration::ZERO,
        blocking: true,
        buffering_ms: 7,
    }
}

fn broker(brokers: &str, topic: &str) -> BrokerConfig {
    BrokerConfig {
        brokers: brokers.to_string(),
        consumer_group_id: "bench".to_string(),
        message_timeout: "10s".to_string(),
        ssl: false,
        topic: topic.to_string(),
    }
}

fn batch(messages_number: u64) -> TimelineStep {
    TimelineStep::Batch(BatchStep {
        body_size: "1KiB".to_string(),
        buffering_ms: 5,
        message_timeout: "20s".to_string(),
        messages_number,
    })
}

fn job(messages_number: u64) -> TimelineStep {
    TimelineStep::Job(JobStep {
        body_size: "2KiB".to_string(),
        buffering_ms: 5,
        message_timeout: "30s".to_string(),
        messages_number,
        message_rate: RateSpec {
            messages: 10,
            per_ms: 100,
        },
    })
}

fn script(dir: &TempDir) -> ConfigFile {
    ConfigFile {
        experiment_name: "scripted".to_string(),
        address: "http://localhost:8080".to_string(),
        source: broker("source:9092", "in"),
        dest: broker("dest:9092", "out"),
        wait_for_consumers_s: 0.0,
        query_every_ms: 5,
        output: OutputPaths {
            image: dir.path().join("out/chart.html"),
            summary: dir.path().join("out/summary.json"),
        },
        messages: vec![
            TimelineStep::Wait { time_ms: 10 },
            batch(50),
            job(30),
            TimelineStep::Wait { time_ms: 20 },
        ],
    }
}

#[test]
fn expected_messages_counts_only_emissions() {
    let steps = vec![
        TimelineStep::Wait { time_ms: 1000 },
        batch(50),
        job(30),
        TimelineStep::Wait { time_ms: 500 },
    ];
    assert_eq!(expected_messages(&steps), 80);
    assert_eq!(expected_messages(&[]), 0);
}

#[test]
fn simple_params_build_both_broker_sides() {
    let params = simple_params();
    let source = params.source();
    let dest = params.dest();
    assert_eq!(source.brokers, "source:9092");
    assert_eq!(source.topic, "in");
    assert_eq!(dest.brokers, "dest:9092");
    assert_eq!(dest.topic, "out");
    assert_eq!(dest.consumer_group_id, "bench");
    assert!(source.ssl && dest.ssl);
}

#[test]
fn wait_seconds_reject_negative_and_non_finite_values() {
    assert_eq!(parse_wait_seconds("5.0"), Ok(Duration::from_secs(5)));
    assert_eq!(parse_wait_seconds("0.25"), Ok(Duration::from_millis(250)));
    assert_eq!(parse_wait_seconds("0"), Ok(Duration::ZERO));
    assert!(parse_wait_seconds("-1").is_err());
    assert!(parse_wait_seconds("NaN").is_err());
    assert!(parse_wait_seconds("inf").is_err());
    assert!(parse_wait_seconds("soon").is_err());
}

#[tokio::test]
async fn simple_mode_summarizes_and_terminates() {
    let api = FakeEmitter::with_counts(&[1000]);

    let summary = run_simple(&api, &simple_params()).await.unwrap().unwrap();

    assert_eq!(summary.body_size.entries, 1000);
    assert_eq!(summary.broker_latency.entries, 1000);
    assert_eq!(summary.send_receive_latency.entries, 1000);
    assert_eq!(api.calls(), vec!["create", "batch", "terminate"]);

    let request = api.batches.lock().unwrap()[0].clone();
    assert!(request.async_mode);
    assert!(request.blocking);
    assert_eq!(request.buffering_ms, 7);
    assert_eq!(request.messages_number, 1000);
    assert_eq!(request.topic, "in");
    assert_eq!(request.message_timeout, "10s");
}

#[tokio::test]
async fn simple_mode_terminates_after_failed_emission() {
    let api = FakeEmitter::with_counts(&[1000]);
    api.fail_emissions.store(true, Ordering::SeqCst);

    let summary = run_simple(&api, &simple_params()).await.unwrap();

    assert!(summary.is_none());
    assert_eq!(api.calls(), vec!["create", "batch", "terminate"]);
    assert_eq!(api.polls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn simple_mode_terminates_after_failed_measurement() {
    let api = FakeEmitter::with_counts(&[1000]);
    api.failing_polls.store(1, Ordering::SeqCst);

    let summary = run_simple(&api, &simple_params()).await.unwrap();

    assert!(summary.is_none());
    assert_eq!(api.count_calls("terminate"), 1);
}

#[tokio::test]
async fn scripted_mode_runs_timeline_and_writes_outputs() {
    let dir = TempDir::new().unwrap();
    let config = script(&dir);
    let api = Arc::new(FakeEmitter::with_counts(&[10, 80]));

    let points = run_scripted(api.clone(), &config).await.unwrap();

    assert!(!points.is_empty());
    assert_eq!(api.calls(), vec!["create", "batch", "job", "terminate"]);

    let batch = api.batches.lock().unwrap()[0].clone();
    assert!(batch.async_mode);
    assert!(!batch.blocking);
    assert_eq!(batch.messages_number, 50);
    assert_eq!(batch.message_timeout, "20s");
    assert_eq!(batch.brokers, "source:9092");

    let job = api.jobs.lock().unwrap()[0].clone();
    assert_eq!(job.message_rate.messages, 10);
    assert_eq!(job.message_rate.per, "100ms");
    assert_eq!(job.messages_number, 30);
    assert_eq!(job.topic, "in");

    let summary: crate::models::ExperimentSummary = serde_json::from_str(
        &std::fs::read_to_string(&config.output.summary).unwrap(),
    )
    .unwrap();
    assert_eq!(summary, points.last().unwrap().experiment_summary);
    assert!(dir.path().join("out/chart.html").exists());
}

#[tokio::test]
async fn scripted_mode_aborts_on_failed_step_without_terminating() {
    let dir = TempDir::new().unwrap();
    let config = script(&dir);
    let api = Arc::new(FakeEmitter::with_counts(&[0]));
    api.fail_emissions.store(true, Ordering::SeqCst);

    let result = run_scripted(api.clone(), &config).await;

    assert!(matches!(result, Err(AnalyzeError::Status { .. })));
    assert_eq!(api.calls(), vec!["create", "batch"]);
    assert!(!config.output.summary.exists());
}
