use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::client::api::{EmitterApi, LatencyEndpoint};
use crate::models::experiment::{ExperimentRef, NewExperiment};
use crate::models::{
    BrokerConfig, ExperimentId, ExperimentOverview, FilteringRequest, JobRequest, MessageRequest,
};
use crate::utils::{AnalyzeError, Result};

#[derive(Debug, Serialize)]
struct LatencyRequest<'a> {
    experiment_uuid: ExperimentId,
    source: &'a FilteringRequest,
    dest: &'a FilteringRequest,
}

#[derive(Debug, serde::Deserialize)]
struct BeginResponse {
    experiment_uuid: ExperimentId,
}

/// HTTP client of the emitter service rooted at `address`
/// (e.g. `http://localhost:8080`).
#[derive(Debug, Clone)]
pub struct EmitterClient {
    address: String,
    http: Client,
}

impl EmitterClient {
    pub fn new(address: impl Into<String>) -> Result<Self> {
        Self::with_timeout(address, None)
    }

    /// `timeout` bounds every request; `None` keeps the transport default.
    pub fn with_timeout(address: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            address: address.into().trim_end_matches('/').to_string(),
            http: builder.build()?,
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Response> {
        let url = self.url(path);
        debug!("{method} {url}");
        let response = self.http.request(method, &url).json(body).send().await?;
        ensure_success(url, response).await
    }

    async fn post_for<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self.send_json(Method::POST, path, body).await?;
        Ok(response.json().await?)
    }

    /// Posts an emission; a rejected request is logged with its payload.
    async fn post_emission<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let url = self.url(path);
        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::OK {
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        error!(
            "Failure for message body: {}",
            serde_json::to_string(body).unwrap_or_default()
        );
        error!("{text}");
        if status.is_success() {
            return Ok(());
        }
        Err(AnalyzeError::Status {
            url,
            status,
            body: text,
        })
    }
}

async fn ensure_success(url: String, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(AnalyzeError::Status { url, status, body })
}

#[async_trait]
impl EmitterApi for EmitterClient {
    async fn create_experiment(
        &self,
        source: &BrokerConfig,
        dest: &BrokerConfig,
    ) -> Result<ExperimentId> {
        let body = NewExperiment {
            listeners: vec![source.clone(), dest.clone()],
        };
        let response: BeginResponse = self.post_for("/experiment/", &body).await?;
        Ok(response.experiment_uuid)
    }

    async fn terminate_experiment(&self, experiment: ExperimentId) -> Result<()> {
        let body = ExperimentRef {
            experiment_uuid: experiment,
        };
        self.send_json(Method::DELETE, "/experiment/", &body).await?;
        Ok(())
    }

    async fn send_batch(&self, request: &MessageRequest) -> Result<()> {
        self.post_emission("/message/", request).await
    }

    async fn send_job(&self, request: &JobRequest) -> Result<()> {
        self.post_emission("/message/job", request).await
    }

    async fn payload_sizes(&self, experiment: ExperimentId) -> Result<Vec<u64>> {
        let body = ExperimentRef {
            experiment_uuid: experiment,
        };
        self.post_for("/measurements/bytes-size", &body).await
    }

    async fn latencies(
        &self,
        endpoint: LatencyEndpoint,
        experiment: ExperimentId,
        source: &FilteringRequest,
        dest: &FilteringRequest,
    ) -> Result<Vec<u64>> {
        let body = LatencyRequest {
            experiment_uuid: experiment,
            source,
            dest,
        };
        self.post_for(&format!("/measurements/{}", endpoint.path()), &body)
            .await
    }

    async fn list_experiments(&self) -> Result<Vec<ExperimentId>> {
        let url = self.url("/experiment/list");
        let response = self.http.get(&url).send().await?;
        Ok(ensure_success(url, response).await?.json().await?)
    }

    async fn experiment_overview(&self, experiment: ExperimentId) -> Result<ExperimentOverview> {
        let url = self.url("/experiment/overview");
        let response = self
            .http
            .get(&url)
            .query(&ExperimentRef {
                experiment_uuid: experiment,
            })
            .send()
            .await?;
        Ok(ensure_success(url, response).await?.json().await?)
    }
}
