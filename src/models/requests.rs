use serde::{Deserialize, Serialize};

use super::{BrokerConfig, ExperimentId};

/// A single, unthrottled emission of `messages_number` messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRequest {
    #[serde(rename = "async")]
    pub async_mode: bool,
    pub blocking: bool,
    /// Payload size, e.g. `10KiB`.
    pub body_size: String,
    pub brokers: String,
    pub buffering_ms: u32,
    pub experiment_uuid: ExperimentId,
    pub message_timeout: String,
    pub messages_number: u64,
    pub ssl: bool,
    pub topic: String,
}

impl MessageRequest {
    /// Builds a batch aimed at the given broker side, always in async mode.
    pub fn batch(
        experiment_uuid: ExperimentId,
        target: &BrokerConfig,
        messages_number: u64,
        body_size: impl Into<String>,
        buffering_ms: u32,
        blocking: bool,
    ) -> Self {
        Self {
            async_mode: true,
            blocking,
            body_size: body_size.into(),
            brokers: target.brokers.clone(),
            buffering_ms,
            experiment_uuid,
            message_timeout: target.message_timeout.clone(),
            messages_number,
            ssl: target.ssl,
            topic: target.topic.clone(),
        }
    }
}

/// Target rate of a job: `messages` every `per` (human readable duration).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRate {
    pub messages: u64,
    pub per: String,
}

impl MessageRate {
    pub fn per_millis(messages: u64, per_ms: u64) -> Self {
        Self {
            messages,
            per: format!("{per_ms}ms"),
        }
    }
}

/// An emission throttled to `message_rate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRequest {
    pub body_size: String,
    pub brokers: String,
    pub buffering_ms: u32,
    pub experiment_uuid: ExperimentId,
    pub message_rate: MessageRate,
    pub message_timeout: String,
    pub messages_number: u64,
    pub ssl: bool,
    pub topic: String,
}
