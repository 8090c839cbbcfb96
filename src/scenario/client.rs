use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::HttpError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// One call against the target API.
///
/// `path` is relative to the configured base URL (for example `/auth`).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
    pub bearer_token: Option<String>,
}

impl ApiRequest {
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            body: None,
            bearer_token: None,
        }
    }

    /// POST with a JSON body; the client sets `Content-Type: application/json`.
    #[must_use]
    pub fn post_json(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            body: Some(body),
            bearer_token: None,
        }
    }

    #[must_use]
    pub fn with_bearer(mut self, token: &str) -> Self {
        self.bearer_token = Some(token.to_owned());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    #[must_use]
    pub const fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error when the body is not valid JSON for `T`.
    pub fn json<T>(&self) -> Result<T, serde_json::Error>
    where
        T: DeserializeOwned,
    {
        serde_json::from_slice(&self.body)
    }
}

/// HTTP seam used by the workflow.
///
/// A transport failure is an `Err`; any HTTP status, including 4xx/5xx, is an
/// `Ok` response.
#[async_trait]
pub trait ScenarioClient: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, HttpError>;
}
