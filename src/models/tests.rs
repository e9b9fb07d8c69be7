use super::*;
use serde_json::json;
use uuid::Uuid;

fn source() -> BrokerConfig {
    BrokerConfig {
        brokers: "kafka-a:9092,kafka-b:9092".to_string(),
        consumer_group_id: "bench".to_string(),
        message_timeout: "10s".to_string(),
        ssl: true,
        topic: "source-topic".to_string(),
    }
}

fn experiment_id() -> ExperimentId {
    ExperimentId(Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap())
}

#[test]
fn broker_config_uses_wire_field_names() {
    let value = serde_json::to_value(source()).unwrap();
    assert_eq!(
        value,
        json!({
            "brokers": "kafka-a:9092,kafka-b:9092",
            "consumer_group_id": "bench",
            "message_timeout": "10s",
            "ssl": true,
            "topic": "source-topic",
        })
    );
    let back: BrokerConfig = serde_json::from_value(value).unwrap();
    assert_eq!(back, source());
}

#[test]
fn message_request_serializes_async_under_wire_name() {
    let request = MessageRequest::batch(experiment_id(), &source(), 1000, "1KiB", 5, false);
    let value = serde_json::to_value(&request).unwrap();

    assert_eq!(value["async"], json!(true));
    assert!(value.get("async_mode").is_none());
    assert_eq!(value["experiment_uuid"], json!("67e55044-10b1-426f-9247-bb680e5fe0c8"));
    assert_eq!(value["messages_number"], json!(1000));
    assert_eq!(value["brokers"], json!("kafka-a:9092,kafka-b:9092"));
    assert_eq!(value["message_timeout"], json!("10s"));

    let back: MessageRequest = serde_json::from_value(value).unwrap();
    assert_eq!(back, request);
}

#[test]
fn job_request_carries_rate_as_duration_string() {
    let request = JobRequest {
        body_size: "10KiB".to_string(),
        brokers: "kafka:9092".to_string(),
        buffering_ms: 5,
        experiment_uuid: experiment_id(),
        message_rate: MessageRate::per_millis(10, 250),
        message_timeout: "30s".to_string(),
        messages_number: 300,
        ssl: false,
        topic: "t".to_string(),
    };
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["message_rate"], json!({"messages": 10, "per": "250ms"}));

    let back: JobRequest = serde_json::from_value(value).unwrap();
    assert_eq!(back, request);
}

#[test]
fn filtering_request_is_derived_from_broker_config() {
    let filter = FilteringRequest::from(&source());
    assert_eq!(filter.brokers, "kafka-a:9092,kafka-b:9092");
    assert_eq!(filter.consumer_group, "bench");
    assert_eq!(filter.topic, "source-topic");
}

#[test]
fn experiment_id_parses_and_displays_hyphenated() {
    let id: ExperimentId = "67e55044-10b1-426f-9247-bb680e5fe0c8".parse().unwrap();
    assert_eq!(id, experiment_id());
    assert_eq!(id.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
    assert!("not-a-uuid".parse::<ExperimentId>().is_err());
}

#[test]
fn experiment_summary_names_broker_latency_kafka_latency() {
    let summary = ExperimentSummary::default();
    let value = serde_json::to_value(summary).unwrap();
    assert!(value.get("kafka_latency").is_some());
    assert!(value.get("body_size").is_some());
    assert!(value.get("send_receive_latency").is_some());
}

#[test]
fn sent_bytes_is_entries_times_mean() {
    let summary = ExperimentSummary {
        body_size: IntListSummary {
            min: 1024,
            max: 1024,
            mean: 1024.0,
            median: 1024.0,
            entries: 4,
        },
        ..Default::default()
    };
    assert_eq!(summary.sent_bytes(), 4096.0);
}

#[test]
fn overview_tolerates_missing_end_timestamp() {
    let overview: ExperimentOverview = serde_json::from_value(json!({
        "experiment": {
            "uuid": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "consumers": [source()],
            "experiment_start_timestamp_millis": 1_700_000_000_000u64
        },
        "messages": 12,
        "events": 36
    }))
    .unwrap();
    assert_eq!(overview.experiment.uuid, experiment_id());
    assert_eq!(overview.experiment.experiment_end_timestamp_millis, None);
    assert_eq!(overview.messages, 12);
}
