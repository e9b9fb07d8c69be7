use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::BrokerConfig;
use crate::utils::{AnalyzeError, Result};

fn default_wait_for_consumers_s() -> f64 {
    5.0
}

fn default_buffering_ms() -> u32 {
    5
}

/// Declarative description of a scripted experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub experiment_name: String,
    /// Base URL of the emitter service.
    pub address: String,
    pub source: BrokerConfig,
    pub dest: BrokerConfig,
    /// Consumers need a moment to join their groups before anything is sent.
    #[serde(default = "default_wait_for_consumers_s")]
    pub wait_for_consumers_s: f64,
    pub query_every_ms: u64,
    pub output: OutputPaths,
    pub messages: Vec<TimelineStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputPaths {
    pub image: PathBuf,
    pub summary: PathBuf,
}

/// One step of the experiment timeline, executed strictly in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "what", rename_all = "lowercase")]
pub enum TimelineStep {
    Wait { time_ms: u64 },
    Batch(BatchStep),
    Job(JobStep),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchStep {
    pub body_size: String,
    #[serde(default = "default_buffering_ms")]
    pub buffering_ms: u32,
    pub message_timeout: String,
    pub messages_number: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobStep {
    pub body_size: String,
    #[serde(default = "default_buffering_ms")]
    pub buffering_ms: u32,
    pub message_timeout: String,
    pub messages_number: u64,
    pub message_rate: RateSpec,
}

/// `messages` every `per_ms` milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSpec {
    pub messages: u64,
    pub per_ms: u64,
}

impl TimelineStep {
    /// Messages this step makes the emitter produce.
    pub fn messages_number(&self) -> u64 {
        match self {
            Self::Wait { .. } => 0,
            Self::Batch(batch) => batch.messages_number,
            Self::Job(job) => job.messages_number,
        }
    }
}

impl ConfigFile {
    /// Reads and validates an experiment script. Nothing is sent to the
    /// service when this fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: ConfigFile =
            serde_json::from_str(&text).map_err(|e| AnalyzeError::InvalidConfig {
                path: path.to_path_buf(),
                violations: vec![e.to_string()],
            })?;

        let violations = config.validate();
        if !violations.is_empty() {
            return Err(AnalyzeError::InvalidConfig {
                path: path.to_path_buf(),
                violations,
            });
        }
        Ok(config)
    }

    /// Every semantic problem of the script, empty when it is usable.
    pub fn validate(&self) -> Vec<String> {
        let mut violations = Vec::new();

        if self.experiment_name.trim().is_empty() {
            violations.push("experiment_name is empty".to_string());
        }
        match reqwest::Url::parse(&self.address) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => violations.push(format!(
                "address must use http or https, got {}",
                url.scheme()
            )),
            Err(e) => violations.push(format!("address {:?} is not a URL: {e}", self.address)),
        }
        check_broker("source", &self.source, &mut violations);
        check_broker("dest", &self.dest, &mut violations);

        if !self.wait_for_consumers_s.is_finite() || self.wait_for_consumers_s < 0.0 {
            violations.push("wait_for_consumers_s must be a non-negative number".to_string());
        }
        if self.query_every_ms == 0 {
            violations.push("query_every_ms must be greater than 0".to_string());
        }
        if self.output.image.as_os_str().is_empty() {
            violations.push("output.image is empty".to_string());
        } else if !self
            .output
            .image
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("html"))
        {
            violations.push(format!(
                "output.image {} must end in .html, the chart is rendered as HTML",
                self.output.image.display()
            ));
        }
        if self.output.summary.as_os_str().is_empty() {
            violations.push("output.summary is empty".to_string());
        }

        for (idx, step) in self.messages.iter().enumerate() {
            let at = format!("messages[{idx}]");
            match step {
                TimelineStep::Wait { .. } => {}
                TimelineStep::Batch(batch) => check_emission(
                    &at,
                    &batch.body_size,
                    &batch.message_timeout,
                    batch.messages_number,
                    &mut violations,
                ),
                TimelineStep::Job(job) => {
                    check_emission(
                        &at,
                        &job.body_size,
                        &job.message_timeout,
                        job.messages_number,
                        &mut violations,
                    );
                    if job.message_rate.messages == 0 {
                        violations.push(format!("{at}.message_rate.messages must be greater than 0"));
                    }
                    if job.message_rate.per_ms == 0 {
                        violations.push(format!("{at}.message_rate.per_ms must be greater than 0"));
                    }
                }
            }
        }

        violations
    }
}

fn check_broker(side: &str, cfg: &BrokerConfig, violations: &mut Vec<String>) {
    if cfg.brokers.trim().is_empty() {
        violations.push(format!("{side}.brokers is empty"));
    }
    if cfg.topic.trim().is_empty() {
        violations.push(format!("{side}.topic is empty"));
    }
    if cfg.consumer_group_id.trim().is_empty() {
        violations.push(format!("{side}.consumer_group_id is empty"));
    }
    if let Err(e) = humantime::parse_duration(&cfg.message_timeout) {
        violations.push(format!("{side}.message_timeout: {e}"));
    }
}

fn check_emission(
    at: &str,
    body_size: &str,
    message_timeout: &str,
    messages_number: u64,
    violations: &mut Vec<String>,
) {
    if messages_number == 0 {
        violations.push(format!("{at}.messages_number must be greater than 0"));
    }
    if let Err(e) = byte_unit::Byte::parse_str(body_size, true) {
        violations.push(format!("{at}.body_size {body_size:?}: {e}"));
    }
    if let Err(e) = humantime::parse_duration(message_timeout) {
        violations.push(format!("{at}.message_timeout: {e}"));
    }
}
