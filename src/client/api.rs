use async_trait::async_trait;

use crate::models::{
    BrokerConfig, ExperimentId, ExperimentOverview, FilteringRequest, JobRequest, MessageRequest,
};
use crate::utils::Result;

/// Latency measurement endpoints. Both take the same request and return raw
/// samples in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyEndpoint {
    /// Time between the source and the destination broker timestamps.
    Broker,
    /// Time between the producer send and the destination consumer receive.
    SendReceive,
}

impl LatencyEndpoint {
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Broker => "kafka-latencies",
            Self::SendReceive => "send-receive-latency",
        }
    }
}

/// Experiment lifecycle and measurement operations of the emitter service.
#[async_trait]
pub trait EmitterApi: Send + Sync {
    /// Registers a new experiment listening on both broker sides.
    async fn create_experiment(
        &self,
        source: &BrokerConfig,
        dest: &BrokerConfig,
    ) -> Result<ExperimentId>;

    /// Stops the experiment's consumers and drops its events. Call once per
    /// created experiment.
    async fn terminate_experiment(&self, experiment: ExperimentId) -> Result<()>;

    async fn send_batch(&self, request: &MessageRequest) -> Result<()>;

    async fn send_job(&self, request: &JobRequest) -> Result<()>;

    /// Raw payload sizes of every message produced in the experiment.
    async fn payload_sizes(&self, experiment: ExperimentId) -> Result<Vec<u64>>;

    async fn latencies(
        &self,
        endpoint: LatencyEndpoint,
        experiment: ExperimentId,
        source: &FilteringRequest,
        dest: &FilteringRequest,
    ) -> Result<Vec<u64>>;

    async fn list_experiments(&self) -> Result<Vec<ExperimentId>>;

    async fn experiment_overview(&self, experiment: ExperimentId) -> Result<ExperimentOverview>;
}
