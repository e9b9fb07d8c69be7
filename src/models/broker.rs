use serde::{Deserialize, Serialize};

/// Connection, topic and consumer-group parameters for one side of an
/// experiment.
///
/// An experiment always has two of these: the source cluster messages are
/// produced to and the destination cluster they are mirrored into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerConfig {
    /// Comma separated bootstrap servers.
    pub brokers: String,
    pub consumer_group_id: String,
    /// Human readable duration, e.g. `10s`.
    pub message_timeout: String,
    pub ssl: bool,
    pub topic: String,
}

/// Scopes a latency query to a single side of an experiment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteringRequest {
    pub brokers: String,
    pub consumer_group: String,
    pub topic: String,
}

impl From<&BrokerConfig> for FilteringRequest {
    fn from(cfg: &BrokerConfig) -> Self {
        Self {
            brokers: cfg.brokers.clone(),
            consumer_group: cfg.consumer_group_id.clone(),
            topic: cfg.topic.clone(),
        }
    }
}
