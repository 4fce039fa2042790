//! HTTP executor client.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::{AlgorithmExecutor, PollResponse, RunRequest, StepResponse};
use crate::config::ExecutorConfig;
use crate::error::{Error, Result};

const RUN_PATH: &str = "/api/grafo";
const STEP_PATH: &str = "/api/step";
const POLL_PATH: &str = "/algoritmo/estado";

/// Talks to the executor over HTTP.
///
/// The client keeps a cookie store so every request of a run carries the
/// session the executor handed out on `start_run`.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    base_url: String,
    client: reqwest::Client,
}

impl HttpExecutor {
    /// Builds a client from the executor settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &ExecutorConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, &url)
            .header("Accept", "application/json")
    }
}

/// Turns a non-success status into [`Error::ExecutorRejected`].
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    Err(Error::ExecutorRejected { status, body })
}

/// Reads a success body as `T`; a body that does not decode is a transport failure.
async fn decode<T: DeserializeOwned>(resp: reqwest::Response, what: &str) -> Result<T> {
    let body = check_status(resp).await?.text().await?;
    serde_json::from_str(&body)
        .map_err(|err| Error::Transport(format!("invalid {what} response: {err}")))
}

#[async_trait]
impl AlgorithmExecutor for HttpExecutor {
    fn executor_type(&self) -> &'static str {
        "http"
    }

    async fn start_run(&self, request: &RunRequest) -> Result<()> {
        info!(
            base_url = %self.base_url,
            algorithm = %request.algorithm,
            source = request.source,
            nodes = request.nodes.len(),
            "Starting remote run"
        );
        let resp = self
            .request(reqwest::Method::POST, RUN_PATH)
            .json(request)
            .send()
            .await?;
        check_status(resp).await?;
        Ok(())
    }

    async fn next_step(&self) -> Result<StepResponse> {
        let resp = self.request(reqwest::Method::POST, STEP_PATH).send().await?;
        let step: StepResponse = decode(resp, "step").await?;
        debug!(step = step.step, finished = step.finished, "Step received");
        Ok(step)
    }

    async fn poll_state(&self) -> Result<PollResponse> {
        let resp = self.request(reqwest::Method::GET, POLL_PATH).send().await?;
        let state: PollResponse = decode(resp, "state").await?;
        debug!(finished = state.finished, "State polled");
        Ok(state)
    }
}
