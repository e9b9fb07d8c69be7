use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::BrokerConfig;

/// Server issued identifier of an experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExperimentId(pub Uuid);

impl fmt::Display for ExperimentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for ExperimentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<Uuid> for ExperimentId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// Body of every request that only names an experiment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentRef {
    pub experiment_uuid: ExperimentId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExperiment {
    pub listeners: Vec<BrokerConfig>,
}

/// Experiment as registered on the emitter service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentInfo {
    pub uuid: ExperimentId,
    pub consumers: Vec<BrokerConfig>,
    pub experiment_start_timestamp_millis: u64,
    #[serde(default)]
    pub experiment_end_timestamp_millis: Option<u64>,
}

/// General information about a running experiment: how many messages were
/// produced and how many consumer events were recorded so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentOverview {
    pub experiment: ExperimentInfo,
    pub messages: usize,
    pub events: usize,
}
