use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use crate::client::EmitterApi;
use crate::collector::{Collector, CollectorState, StopFlag};
use crate::config::{ConfigFile, TimelineStep};
use crate::models::{ExperimentId, ExperimentSummaryPoint, JobRequest, MessageRate, MessageRequest};
use crate::report;
use crate::utils::{AnalyzeError, Result};

/// Total number of messages the timeline makes the emitter produce.
pub fn expected_messages(steps: &[TimelineStep]) -> u64 {
    steps.iter().map(TimelineStep::messages_number).sum()
}

/// Runs the experiment described by `config` while collecting measurements
/// in the background, then writes the summary file and the chart.
///
/// A failing timeline step aborts the run and leaves the remote experiment
/// alive; its id is logged so it can be terminated by hand.
pub async fn run_scripted<A: EmitterApi + 'static>(
    api: Arc<A>,
    config: &ConfigFile,
) -> Result<Vec<ExperimentSummaryPoint>> {
    let expected = expected_messages(&config.messages);

    let experiment = api.create_experiment(&config.source, &config.dest).await?;
    info!(
        "Created experiment {experiment} for {}, expecting {expected} messages",
        config.experiment_name
    );

    let warm_up = Duration::try_from_secs_f64(config.wait_for_consumers_s).unwrap_or_default();
    tokio::time::sleep(warm_up).await;

    let stop = StopFlag::new();
    let collector = Collector::new(
        api.clone(),
        CollectorState {
            experiment,
            source: config.source.clone(),
            dest: config.dest.clone(),
            stop: stop.clone(),
            every: Duration::from_millis(config.query_every_ms),
            expected_messages: expected,
        },
    )
    .spawn();

    if let Err(e) = run_timeline(api.as_ref(), experiment, config).await {
        stop.raise();
        if let Err(join) = collector.await {
            error!("Collector for experiment {experiment} failed: {join}");
        }
        error!("Timeline failed, experiment {experiment} was not terminated: {e}");
        return Err(e);
    }

    stop.raise();
    let points = collector.await?;
    api.terminate_experiment(experiment).await?;
    info!(
        "Terminated experiment {experiment} with {} collected points",
        points.len()
    );

    let last = points.last().ok_or(AnalyzeError::NoSamples)?;
    report::write_summary(&config.output.summary, &last.experiment_summary)?;
    report::render_chart(&config.experiment_name, &config.output.image, &points)?;

    Ok(points)
}

async fn run_timeline<A: EmitterApi + ?Sized>(
    api: &A,
    experiment: ExperimentId,
    config: &ConfigFile,
) -> Result<()> {
    let source = &config.source;

    for (idx, step) in config.messages.iter().enumerate() {
        match step {
            TimelineStep::Wait { time_ms } => {
                info!("Step {idx}: waiting {time_ms} ms");
                tokio::time::sleep(Duration::from_millis(*time_ms)).await;
            }
            TimelineStep::Batch(batch) => {
                info!("Step {idx}: batch of {} messages", batch.messages_number);
                let request = MessageRequest {
                    message_timeout: batch.message_timeout.clone(),
                    ..MessageRequest::batch(
                        experiment,
                        source,
                        batch.messages_number,
                        batch.body_size.clone(),
                        batch.buffering_ms,
                        false,
                    )
                };
                api.send_batch(&request).await?;
            }
            TimelineStep::Job(job) => {
                info!(
                    "Step {idx}: job of {} messages at {} per {} ms",
                    job.messages_number, job.message_rate.messages, job.message_rate.per_ms
                );
                let request = JobRequest {
                    body_size: job.body_size.clone(),
                    brokers: source.brokers.clone(),
                    buffering_ms: job.buffering_ms,
                    experiment_uuid: experiment,
                    message_rate: MessageRate::per_millis(
                        job.message_rate.messages,
                        job.message_rate.per_ms,
                    ),
                    message_timeout: job.message_timeout.clone(),
                    messages_number: job.messages_number,
                    ssl: source.ssl,
                    topic: source.topic.clone(),
                };
                api.send_job(&request).await?;
            }
        }
    }
    Ok(())
}
