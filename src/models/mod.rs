//! The `models` module holds the JSON shapes exchanged with the emitter
//! service and the summaries produced from its measurements.
//!
//! - `broker`: broker-side configuration and measurement filters.
//! - `requests`: message emission requests (batches and rate-limited jobs).
//! - `summary`: aggregated statistics and the time series built by the collector.
//! - `experiment`: experiment identifiers and the service's overview payload.

pub mod broker;
pub mod experiment;
pub mod requests;
pub mod summary;

pub use broker::{BrokerConfig, FilteringRequest};
pub use experiment::{ExperimentId, ExperimentInfo, ExperimentOverview};
pub use requests::{JobRequest, MessageRate, MessageRequest};
pub use summary::{ExperimentSummary, ExperimentSummaryPoint, IntListSummary};

#[cfg(test)]
mod tests;
