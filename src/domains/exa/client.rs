//! Async HTTP client for the Exa API.

use std::time::Duration;

use reqwest::{RequestBuilder, Response, Url};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, warn};

use super::error::{ExaError, ExaResult};
use super::types::{
    ContentsRequest, ResearchTask, ResearchTaskCreated, ResearchTaskRequest, SearchRequest,
    SearchResponse,
};
use crate::core::config::ExaConfig;

const API_KEY_HEADER: &str = "x-api-key";
const USER_AGENT: &str = concat!("exa-mcp-server/", env!("CARGO_PKG_VERSION"));

/// Client for the Exa search API.
///
/// The underlying `reqwest::Client` pools connections, so one instance is
/// shared by every tool through an `Arc`.
#[derive(Clone)]
pub struct ExaClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for ExaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExaClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl ExaClient {
    /// Build a client from configuration.
    ///
    /// The key is optional so the client can exist in listing mode; every
    /// request made without a key fails with [`ExaError::MissingApiKey`].
    pub fn new(config: &ExaConfig, api_key: Option<String>) -> ExaResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run a search (`POST /search`).
    #[instrument(skip_all, fields(query = %request.query))]
    pub async fn search(&self, request: &SearchRequest) -> ExaResult<SearchResponse> {
        self.post("/search", request).await
    }

    /// Fetch page contents (`POST /contents`).
    #[instrument(skip_all, fields(ids = ?request.ids))]
    pub async fn contents(&self, request: &ContentsRequest) -> ExaResult<SearchResponse> {
        self.post("/contents", request).await
    }

    /// Start a deep research task (`POST /research/v0/tasks`).
    #[instrument(skip_all)]
    pub async fn start_research(
        &self,
        request: &ResearchTaskRequest,
    ) -> ExaResult<ResearchTaskCreated> {
        self.post("/research/v0/tasks", request).await
    }

    /// Fetch the state of a research task (`GET /research/v0/tasks/{id}`).
    #[instrument(skip(self))]
    pub async fn research_task(&self, task_id: &str) -> ExaResult<ResearchTask> {
        let url = self.task_url(task_id)?;
        debug!("GET {}", url);
        let request = self.authorize(self.http.get(url))?;
        Self::decode(request.send().await?).await
    }

    /// `{base}/research/v0/tasks/{id}` with the id percent-encoded as one
    /// segment. Dot segments are rejected since URL normalization would
    /// resolve them against the parent path.
    fn task_url(&self, task_id: &str) -> ExaResult<Url> {
        if matches!(task_id, "" | "." | "..") {
            return Err(ExaError::InvalidTaskId(task_id.to_string()));
        }

        let mut url =
            Url::parse(&self.base_url).map_err(|_| ExaError::InvalidBaseUrl(self.base_url.clone()))?;
        url.path_segments_mut()
            .map_err(|_| ExaError::InvalidBaseUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["research", "v0", "tasks", task_id]);

        Ok(url)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> ExaResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);
        let request = self.authorize(self.http.post(url).json(body))?;
        Self::decode(request.send().await?).await
    }

    fn authorize(&self, request: RequestBuilder) -> ExaResult<RequestBuilder> {
        let key = self.api_key.as_deref().ok_or(ExaError::MissingApiKey)?;
        Ok(request
            .header(API_KEY_HEADER, key)
            .header(reqwest::header::ACCEPT, "application/json"))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ExaResult<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Exa API returned {}: {}", status, body);
            return Err(ExaError::api(status.as_u16(), error_message(&body)));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Pull a readable message out of an Exa error body.
///
/// Exa usually answers `{"error": "..."}`; anything else is passed through.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
