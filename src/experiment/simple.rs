use std::time::Duration;

use tracing::{error, info};

use crate::client::EmitterApi;
use crate::collector::measure;
use crate::models::{BrokerConfig, ExperimentId, ExperimentSummary, MessageRequest};
use crate::utils::Result;

/// Parameters of a single-batch experiment.
#[derive(Debug, Clone)]
pub struct SimpleExperiment {
    pub source_brokers: String,
    pub dest_brokers: String,
    pub consumer_group: String,
    pub source_topic: String,
    pub dest_topic: String,
    pub message_timeout: String,
    pub ssl: bool,
    pub messages_number: u64,
    /// Payload size, e.g. `10KiB`.
    pub message_size: String,
    /// Delay between emitting and measuring.
    pub wait: Duration,
    /// Delay between creating the experiment and emitting.
    pub consumers_wait: Duration,
    pub blocking: bool,
    pub buffering_ms: u32,
}

impl SimpleExperiment {
    pub fn source(&self) -> BrokerConfig {
        self.broker(&self.source_brokers, &self.source_topic)
    }

    pub fn dest(&self) -> BrokerConfig {
        self.broker(&self.dest_brokers, &self.dest_topic)
    }

    fn broker(&self, brokers: &str, topic: &str) -> BrokerConfig {
        BrokerConfig {
            brokers: brokers.to_string(),
            consumer_group_id: self.consumer_group.clone(),
            message_timeout: self.message_timeout.clone(),
            ssl: self.ssl,
            topic: topic.to_string(),
        }
    }
}

/// Parses a non-negative, finite number of seconds such as `5` or `0.5`.
pub fn parse_wait_seconds(value: &str) -> std::result::Result<Duration, String> {
    let secs: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("{value:?} is not a number of seconds: {e}"))?;
    Duration::try_from_secs_f64(secs)
        .map_err(|_| format!("{value:?} must be a non-negative, finite number of seconds"))
}

/// Runs a single-batch experiment and prints its summary.
///
/// Emission and measurement failures are logged and swallowed so that the
/// experiment is always terminated; `None` is returned in that case. A failed
/// termination is returned as an error.
pub async fn run_simple<A: EmitterApi + ?Sized>(
    api: &A,
    params: &SimpleExperiment,
) -> Result<Option<ExperimentSummary>> {
    let source = params.source();
    let dest = params.dest();

    let experiment = api.create_experiment(&source, &dest).await?;
    info!("Created experiment {experiment}");

    // consumers have to join their groups before anything is produced
    tokio::time::sleep(params.consumers_wait).await;

    let summary = match emit_and_measure(api, experiment, params, &source, &dest).await {
        Ok(summary) => Some(summary),
        Err(e) => {
            error!("Experiment {experiment} failed: {e}");
            None
        }
    };

    api.terminate_experiment(experiment).await?;
    info!("Terminated experiment {experiment}");
    Ok(summary)
}

async fn emit_and_measure<A: EmitterApi + ?Sized>(
    api: &A,
    experiment: ExperimentId,
    params: &SimpleExperiment,
    source: &BrokerConfig,
    dest: &BrokerConfig,
) -> Result<ExperimentSummary> {
    let request = MessageRequest::batch(
        experiment,
        source,
        params.messages_number,
        params.message_size.clone(),
        params.buffering_ms,
        params.blocking,
    );
    api.send_batch(&request).await?;
    info!(
        "Sent {} messages of {} to {}",
        params.messages_number, params.message_size, source.topic
    );

    tokio::time::sleep(params.wait).await;

    let (summary, _) = measure(api, experiment, source, dest).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(summary)
}
