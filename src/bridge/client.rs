//! HTTP client for the course assistant backend.
//!
//! Two endpoints, both relative to a base URL:
//! - `POST {base}/query` with [`QueryRequest`], answering [`QueryResponse`]
//! - `GET {base}/courses`, answering [`CourseStats`]
//!
//! Any non-2xx status is a failure. There is no timeout and no retry.

use crate::model::{BridgeError, CourseStats, SessionId, Source};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Body of `POST /query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryRequest {
    /// Trimmed user question.
    pub query: String,
    /// Conversation to continue, `null` to let the backend start one.
    pub session_id: Option<SessionId>,
}

/// Body of a successful `POST /query`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueryResponse {
    /// Conversation the answer belongs to.
    pub session_id: SessionId,
    /// Markdown answer.
    pub answer: String,
    /// Raw, possibly duplicated, sources.
    #[serde(default)]
    pub sources: Vec<Source>,
}

/// Backend operations used by the client.
///
/// Implementations block the calling thread; callers run them off the UI
/// thread (see [`crate::bridge::worker`]).
pub trait ChatApi: Send + Sync + std::fmt::Debug {
    /// Send one question.
    ///
    /// # Errors
    ///
    /// [`BridgeError::Transport`] if the request never completed,
    /// [`BridgeError::Server`] on a non-success status,
    /// [`BridgeError::Decode`] if the body is not a [`QueryResponse`].
    fn query(&self, request: &QueryRequest) -> Result<QueryResponse, BridgeError>;

    /// Fetch catalogue statistics.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`ChatApi::query`].
    fn courses(&self) -> Result<CourseStats, BridgeError>;
}

/// [`ChatApi`] over blocking `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpChatApi {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpChatApi {
    /// Create a client for the backend rooted at `base_url` (e.g. `http://host/api`).
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, BridgeError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None)
            .build()
            .map_err(|e| BridgeError::Transport(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!(base_url = %base_url, "Backend client ready");
        Ok(Self { client, base_url })
    }

    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::blocking::Response,
    ) -> Result<T, BridgeError> {
        let status = response.status();
        if !status.is_success() {
            return Err(BridgeError::Server {
                status: status.as_u16(),
            });
        }
        let body = response
            .text()
            .map_err(|e| BridgeError::Transport(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| BridgeError::Decode(e.to_string()))
    }
}

impl ChatApi for HttpChatApi {
    fn query(&self, request: &QueryRequest) -> Result<QueryResponse, BridgeError> {
        let url = self.endpoint("query");
        debug!(url = %url, has_session = request.session_id.is_some(), "Sending query");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .map_err(|e| BridgeError::Transport(e.to_string()))?;

        Self::read_json(response)
    }

    fn courses(&self) -> Result<CourseStats, BridgeError> {
        let url = self.endpoint("courses");
        debug!(url = %url, "Loading course stats");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| BridgeError::Transport(e.to_string()))?;

        Self::read_json(response)
    }
}
