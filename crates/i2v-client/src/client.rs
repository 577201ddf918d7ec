//! Inference service HTTP client.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::{Client, Response};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use i2v_models::{JobHandle, PreparedImage};

use crate::config::InferenceConfig;
use crate::error::{InferenceError, InferenceResult};
use crate::metrics::record_request;
use crate::service::InferenceService;
use crate::types::{InferRequest, OutputRef, PollResponse, PollStatus};

/// Header asking the endpoint to queue the request instead of serving it inline.
const QUEUE_DISPATCH_HEADER: &str = "X-OctoAI-Queue-Dispatch";

/// Client for the inference service.
#[derive(Clone)]
pub struct InferenceClient {
    http: Client,
    config: InferenceConfig,
    /// Completed poll responses not yet fetched, by response id
    completed: Arc<Mutex<HashMap<String, (PollResponse, Value)>>>,
}

impl InferenceClient {
    /// Create a new inference client.
    pub fn new(config: InferenceConfig) -> InferenceResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(concat!("i2v-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(InferenceError::Network)?;

        Ok(Self {
            http,
            config,
            completed: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> InferenceResult<Self> {
        Self::new(InferenceConfig::from_env()?)
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Query the poll URL of a job, returning the parsed status and the raw body.
    async fn poll(&self, handle: &JobHandle) -> InferenceResult<(PollResponse, Value)> {
        let started = Instant::now();
        let response = self
            .http
            .get(&handle.poll_url)
            .bearer_auth(self.config.token())
            .send()
            .await
            .map_err(|e| Self::network_failure("poll", started, e))?;

        let body: Value = Self::parse_json("poll", started, response).await?;
        let status: PollResponse = serde_json::from_value(body.clone())?;
        Ok((status, body))
    }

    fn job_failed(handle: &JobHandle, status: &PollResponse) -> InferenceError {
        InferenceError::JobFailed {
            response_id: handle.response_id.clone(),
            message: status
                .error
                .clone()
                .unwrap_or_else(|| "no error detail reported".to_string()),
        }
    }

    fn network_failure(operation: &str, started: Instant, error: reqwest::Error) -> InferenceError {
        record_request(operation, 0, started.elapsed().as_secs_f64());
        InferenceError::Network(error)
    }

    /// Check the status code, recording metrics, and return the response on success.
    async fn ensure_success(
        operation: &str,
        started: Instant,
        response: Response,
    ) -> InferenceResult<Response> {
        let status = response.status();
        record_request(operation, status.as_u16(), started.elapsed().as_secs_f64());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(operation, status = status.as_u16(), "Inference service returned an error");
            return Err(InferenceError::from_http_status(status.as_u16(), body));
        }
        Ok(response)
    }

    async fn parse_json<T: serde::de::DeserializeOwned>(
        operation: &str,
        started: Instant,
        response: Response,
    ) -> InferenceResult<T> {
        let response = Self::ensure_success(operation, started, response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl InferenceService for InferenceClient {
    async fn submit(&self, image: &PreparedImage) -> InferenceResult<JobHandle> {
        let url = self.config.infer_url();
        debug!(url = %url, image_bytes = image.encoded_len(), "Submitting inference job");

        let started = Instant::now();
        let response = self
            .http
            .post(&url)
            .bearer_auth(self.config.token())
            .header(QUEUE_DISPATCH_HEADER, "true")
            .json(&InferRequest::new(image))
            .send()
            .await
            .map_err(|e| Self::network_failure("submit", started, e))?;

        let handle: JobHandle = Self::parse_json("submit", started, response).await?;
        if handle.response_id.is_empty() || handle.poll_url.is_empty() {
            return Err(InferenceError::invalid_response(
                "submission returned an empty job handle",
            ));
        }

        debug!(response_id = %handle.response_id, "Inference job queued");
        Ok(handle)
    }

    async fn is_ready(&self, handle: &JobHandle) -> InferenceResult<bool> {
        let (status, body) = self.poll(handle).await?;
        match status.status {
            PollStatus::Completed => {
                self.completed
                    .lock()
                    .await
                    .insert(handle.response_id.clone(), (status, body));
                Ok(true)
            }
            PollStatus::Failed => Err(Self::job_failed(handle, &status)),
            PollStatus::Pending | PollStatus::Running | PollStatus::Unknown => Ok(false),
        }
    }

    async fn fetch_result(&self, handle: &JobHandle) -> InferenceResult<Value> {
        // A completed status seen by is_ready is final; reuse it
        let cached = self.completed.lock().await.remove(&handle.response_id);
        let (status, body) = match cached {
            Some(entry) => entry,
            None => self.poll(handle).await?,
        };
        match status.status {
            PollStatus::Completed => {}
            PollStatus::Failed => return Err(Self::job_failed(handle, &status)),
            other => {
                return Err(InferenceError::invalid_response(format!(
                    "result of {} requested while {:?}",
                    handle.response_id, other
                )))
            }
        }

        // Without a response URL the poll body carries the result itself
        let Some(response_url) = status.response_url else {
            return Ok(body);
        };

        let started = Instant::now();
        let response = self
            .http
            .get(&response_url)
            .bearer_auth(self.config.token())
            .send()
            .await
            .map_err(|e| Self::network_failure("fetch", started, e))?;

        Self::parse_json("fetch", started, response).await
    }

    async fn resolve_output(&self, output: &OutputRef) -> InferenceResult<Vec<u8>> {
        match output {
            OutputRef::Base64(data) => Ok(STANDARD.decode(data)?),
            OutputRef::Url(url) => {
                debug!(url = %url, "Downloading generated video");
                let started = Instant::now();
                // Output URLs are pre-signed; the bearer token is not sent along
                let response = self
                    .http
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| Self::network_failure("download", started, e))?;

                let response = Self::ensure_success("download", started, response).await?;
                Ok(response.bytes().await?.to_vec())
            }
        }
    }
}
