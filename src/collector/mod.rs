//! Background collection of experiment measurements.
//!
//! The collector polls the emitter on a fixed interval, turns each poll into
//! an `ExperimentSummaryPoint` and stops once the expected number of messages
//! has been observed or the orchestrator raises the `StopFlag`. Once the flag
//! is seen the collector keeps polling until one poll succeeds (at most
//! `FINAL_POLL_ATTEMPTS` times), so the last point is taken after the stop
//! request.

pub mod poller;
pub mod stop_flag;

pub use poller::{
    COMPLETION_TOLERANCE, Collector, CollectorState, FINAL_POLL_ATTEMPTS, ObservedCounts, measure,
};
pub use stop_flag::StopFlag;
