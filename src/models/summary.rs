use serde::{Deserialize, Serialize};

/// Summary statistics of a list of integer samples.
///
/// `entries` counts the samples that contributed, so a summary built from no
/// observations reports zero everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IntListSummary {
    pub min: u64,
    pub max: u64,
    pub mean: f64,
    pub median: f64,
    pub entries: usize,
}

/// Snapshot of every metric of an experiment at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ExperimentSummary {
    /// Payload sizes in bytes.
    pub body_size: IntListSummary,
    /// Source broker to destination broker latency in milliseconds.
    #[serde(rename = "kafka_latency")]
    pub broker_latency: IntListSummary,
    /// Producer send to consumer receive latency in milliseconds.
    pub send_receive_latency: IntListSummary,
}

impl ExperimentSummary {
    /// Total payload bytes observed so far.
    pub fn sent_bytes(&self) -> f64 {
        self.body_size.entries as f64 * self.body_size.mean
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExperimentSummaryPoint {
    /// UTC epoch milliseconds at which the sample was taken.
    pub timestamp_ms: i64,
    pub experiment_summary: ExperimentSummary,
}

impl ExperimentSummaryPoint {
    pub fn now(experiment_summary: ExperimentSummary) -> Self {
        Self {
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
            experiment_summary,
        }
    }
}
