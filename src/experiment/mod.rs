//! Experiment orchestration.
//!
//! - `simple`: one batch, one measurement, summary printed to stdout.
//! - `scripted`: a timeline from a `ConfigFile`, measured continuously by the
//!   collector and rendered into a summary file and a chart.

pub mod scripted;
pub mod simple;

pub use scripted::{expected_messages, run_scripted};
pub use simple::{SimpleExperiment, parse_wait_seconds, run_simple};

#[cfg(test)]
mod tests;
