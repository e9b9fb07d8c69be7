use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::client::{EmitterApi, LatencyEndpoint};
use crate::collector::StopFlag;
use crate::models::{
    BrokerConfig, ExperimentId, ExperimentSummary, ExperimentSummaryPoint, FilteringRequest,
};
use crate::stats::{int_list_stats, int_similar_percentage};
use crate::utils::Result;

/// Relative margin within which the observed message count counts as complete.
pub const COMPLETION_TOLERANCE: f64 = 0.05;

/// Polls attempted for the final point once the stop flag is seen.
pub const FINAL_POLL_ATTEMPTS: u32 = 5;

/// Everything a collector needs to know about the running experiment.
#[derive(Debug, Clone)]
pub struct CollectorState {
    pub experiment: ExperimentId,
    pub source: BrokerConfig,
    pub dest: BrokerConfig,
    pub stop: StopFlag,
    pub every: Duration,
    pub expected_messages: u64,
}

/// Polls all three measurement sets once and summarizes them.
pub async fn measure<A: EmitterApi + ?Sized>(
    api: &A,
    experiment: ExperimentId,
    source: &BrokerConfig,
    dest: &BrokerConfig,
) -> Result<(ExperimentSummary, ObservedCounts)> {
    let source = FilteringRequest::from(source);
    let dest = FilteringRequest::from(dest);

    let body_sizes = api.payload_sizes(experiment).await?;
    let broker_latencies = api
        .latencies(LatencyEndpoint::Broker, experiment, &source, &dest)
        .await?;
    let send_receive_latencies = api
        .latencies(LatencyEndpoint::SendReceive, experiment, &source, &dest)
        .await?;

    let summary = ExperimentSummary {
        body_size: int_list_stats(&body_sizes),
        broker_latency: int_list_stats(&broker_latencies),
        send_receive_latency: int_list_stats(&send_receive_latencies),
    };
    let observed = ObservedCounts {
        broker_latencies: broker_latencies.len() as u64,
        send_receive_latencies: send_receive_latencies.len() as u64,
    };
    Ok((summary, observed))
}

/// Raw sample counts of one poll, zeros included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservedCounts {
    pub broker_latencies: u64,
    pub send_receive_latencies: u64,
}

impl ObservedCounts {
    pub fn reached(&self, expected: u64) -> bool {
        int_similar_percentage(expected, self.send_receive_latencies, COMPLETION_TOLERANCE)
            || int_similar_percentage(expected, self.broker_latencies, COMPLETION_TOLERANCE)
    }
}

pub struct Collector<A: ?Sized> {
    api: Arc<A>,
    state: CollectorState,
    points: Vec<ExperimentSummaryPoint>,
}

impl<A: EmitterApi + ?Sized + 'static> Collector<A> {
    pub fn new(api: Arc<A>, state: CollectorState) -> Self {
        Self {
            api,
            state,
            points: Vec::new(),
        }
    }

    /// Runs the loop on the tokio runtime. The handle yields every collected
    /// point once the collector has stopped.
    pub fn spawn(self) -> JoinHandle<Vec<ExperimentSummaryPoint>> {
        tokio::spawn(self.run())
    }

    pub async fn run(mut self) -> Vec<ExperimentSummaryPoint> {
        let experiment = self.state.experiment;
        info!(
            "Collecting measurements for experiment {experiment} every {:?}, expecting {} messages",
            self.state.every, self.state.expected_messages
        );

        let mut final_failures = 0;
        loop {
            tokio::time::sleep(self.state.every).await;
            let stopping = self.state.stop.is_raised();

            match self.tick().await {
                Ok(_) if stopping => break,
                Ok(reached) => {
                    if reached && self.state.stop.raise() {
                        info!("Experiment {experiment} reached the expected message count");
                    }
                }
                Err(e) => {
                    error!("Failed to get data for experiment {experiment}: {e}");
                    if stopping {
                        final_failures += 1;
                        if final_failures >= FINAL_POLL_ATTEMPTS {
                            warn!("No final point for experiment {experiment} after {final_failures} attempts");
                            break;
                        }
                    }
                }
            }
        }

        info!(
            "Collector for experiment {experiment} stopped after {} points",
            self.points.len()
        );
        self.points
    }

    async fn tick(&mut self) -> Result<bool> {
        let (summary, observed) = measure(
            self.api.as_ref(),
            self.state.experiment,
            &self.state.source,
            &self.state.dest,
        )
        .await?;
        debug!(
            "Observed {} broker and {} send/receive latencies",
            observed.broker_latencies, observed.send_receive_latencies
        );
        self.points.push(ExperimentSummaryPoint::now(summary));
        Ok(observed.reached(self.state.expected_messages))
    }
}
