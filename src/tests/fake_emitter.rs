//! Scriptable in-memory `EmitterApi` for collector and orchestrator tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::client::{EmitterApi, LatencyEndpoint};
use crate::collector::StopFlag;
use crate::models::{
    BrokerConfig, ExperimentId, ExperimentOverview, FilteringRequest, JobRequest, MessageRequest,
};
use crate::utils::{AnalyzeError, Result};

pub const FAKE_EXPERIMENT: &str = "a1a2a3a4-b1b2-c1c2-d1d2-d3d4d5d6d7d8";

#[derive(Debug, Default)]
pub struct FakeEmitter {
    /// Send/receive sample counts returned by successive polls; the last one
    /// repeats once the script runs out.
    pub counts: Mutex<VecDeque<usize>>,
    current: Mutex<usize>,
    /// Number of upcoming polls that fail.
    pub failing_polls: AtomicUsize,
    pub fail_emissions: AtomicBool,
    pub observed_flag: Mutex<Option<StopFlag>>,
    pub flag_at_poll: Mutex<Vec<bool>>,
    pub polls: AtomicUsize,
    pub calls: Mutex<Vec<&'static str>>,
    pub batches: Mutex<Vec<MessageRequest>>,
    pub jobs: Mutex<Vec<JobRequest>>,
}

impl FakeEmitter {
    pub fn with_counts(counts: &[usize]) -> Self {
        let fake = Self::default();
        *fake.counts.lock().unwrap() = counts.iter().copied().collect();
        fake
    }

    pub fn watch(&self, flag: &StopFlag) {
        *self.observed_flag.lock().unwrap() = Some(flag.clone());
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, name: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == name).count()
    }

    fn record(&self, name: &'static str) {
        self.calls.lock().unwrap().push(name);
    }

    fn emission_result(&self) -> Result<()> {
        if self.fail_emissions.load(Ordering::SeqCst) {
            return Err(fake_status("emission rejected"));
        }
        Ok(())
    }
}

fn fake_status(body: &str) -> AnalyzeError {
    AnalyzeError::Status {
        url: "fake://emitter".to_string(),
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: body.to_string(),
    }
}

#[async_trait]
impl EmitterApi for FakeEmitter {
    async fn create_experiment(&self, _: &BrokerConfig, _: &BrokerConfig) -> Result<ExperimentId> {
        self.record("create");
        Ok(FAKE_EXPERIMENT.parse().expect("valid uuid"))
    }

    async fn terminate_experiment(&self, _: ExperimentId) -> Result<()> {
        self.record("terminate");
        Ok(())
    }

    async fn send_batch(&self, request: &MessageRequest) -> Result<()> {
        self.record("batch");
        self.batches.lock().unwrap().push(request.clone());
        self.emission_result()
    }

    async fn send_job(&self, request: &JobRequest) -> Result<()> {
        self.record("job");
        self.jobs.lock().unwrap().push(request.clone());
        self.emission_result()
    }

    async fn payload_sizes(&self, _: ExperimentId) -> Result<Vec<u64>> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        if let Some(flag) = self.observed_flag.lock().unwrap().as_ref() {
            self.flag_at_poll.lock().unwrap().push(flag.is_raised());
        }
        let failing = self.failing_polls.load(Ordering::SeqCst);
        if failing > 0 {
            self.failing_polls.store(failing - 1, Ordering::SeqCst);
            return Err(fake_status("measurement unavailable"));
        }

        let mut current = self.current.lock().unwrap();
        if let Some(next) = self.counts.lock().unwrap().pop_front() {
            *current = next;
        }
        Ok(vec![1024; *current])
    }

    async fn latencies(
        &self,
        endpoint: LatencyEndpoint,
        _: ExperimentId,
        _: &FilteringRequest,
        _: &FilteringRequest,
    ) -> Result<Vec<u64>> {
        let current = *self.current.lock().unwrap();
        Ok(match endpoint {
            LatencyEndpoint::Broker => vec![3; current],
            LatencyEndpoint::SendReceive => vec![7; current],
        })
    }

    async fn list_experiments(&self) -> Result<Vec<ExperimentId>> {
        Ok(vec![FAKE_EXPERIMENT.parse().expect("valid uuid")])
    }

    async fn experiment_overview(&self, _: ExperimentId) -> Result<ExperimentOverview> {
        Err(fake_status("not supported"))
    }
}
