//! The `utils` module provides a collection of utility functions and common
//! definitions used across the `emitter-analyze` application.
//!
//! It centralizes the crate error type and the tracing setup so every other
//! module reports failures and diagnostics the same way.

pub mod error;
pub mod logging;

pub use error::{AnalyzeError, Result};

#[cfg(test)]
mod tests;
