//! # emitter-analyze
//!
//! `emitter-analyze` drives benchmark experiments against a
//! kafka-http-emitter service: it registers source/destination broker pairs,
//! asks the emitter to produce messages, polls latency and payload-size
//! measurements and turns them into summaries and charts.
//!
//! ## Core Modules
//!
//! - `client`: HTTP façade over the emitter service.
//! - `collector`: background polling loop building a summary time series.
//! - `config`: ambient settings and the JSON experiment script.
//! - `experiment`: the simple (single batch) and scripted (timeline) modes.
//! - `models`: wire types and summaries.
//! - `report`: summary file and chart rendering.
//! - `stats`: reduction of raw samples into summary statistics.
//! - `utils`: error type and logging setup.

pub mod client;
pub mod collector;
pub mod config;
pub mod experiment;
pub mod models;
pub mod report;
pub mod stats;
pub mod utils;

#[cfg(test)]
mod tests;
