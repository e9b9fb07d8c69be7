//! The `error` module defines the error type shared by the whole crate.
//!
//! Failures fall into three groups: transport/HTTP failures from the emitter
//! service, configuration failures detected before any experiment is created,
//! and local I/O or rendering failures while writing reports.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalyzeError>;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} responded with {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid experiment config {}: {}", path.display(), violations.join("; "))]
    InvalidConfig {
        path: PathBuf,
        violations: Vec<String>,
    },

    #[error("settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("no summary points were collected")]
    NoSamples,

    #[error("failed to render chart: {0}")]
    Chart(String),

    #[error("collector task failed: {0}")]
    CollectorJoin(#[from] tokio::task::JoinError),
}
