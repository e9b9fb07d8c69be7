//! The `client` module talks to the kafka-http-emitter service.
//!
//! `EmitterApi` is the seam the collector and the orchestrators are written
//! against; `EmitterClient` is its HTTP implementation. Every call is a single
//! round trip: no retries and no caching.

pub mod api;
pub mod emitter_client;

pub use api::{EmitterApi, LatencyEndpoint};
pub use emitter_client::EmitterClient;
