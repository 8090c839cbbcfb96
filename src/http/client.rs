use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::{Client, Url};
use tracing::debug;

use crate::args::DEFAULT_USER_AGENT;
use crate::error::{AppError, AppResult, HttpError};
use crate::scenario::{ApiRequest, ApiResponse, HttpMethod, ScenarioClient};

/// `reqwest`-backed client for the coin service.
///
/// One instance is shared by every virtual user so connections are pooled
/// across the whole run.
#[derive(Debug, Clone)]
pub struct HttpScenarioClient {
    client: Client,
    base_url: Url,
}

impl HttpScenarioClient {
    /// Builds a client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is not an absolute http(s) URL or
    /// the underlying HTTP client cannot be built.
    pub fn new(base_url: &str, request_timeout: Duration) -> AppResult<Self> {
        let base_url = parse_base_url(base_url).map_err(AppError::http)?;
        let client = Client::builder()
            .timeout(request_timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|source| AppError::http(HttpError::BuildClientFailed { source }))?;
        Ok(Self { client, base_url })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl ScenarioClient for HttpScenarioClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, HttpError> {
        let url = join_endpoint(&self.base_url, &request.path)?;
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
        };
        if let Some(token) = request.bearer_token.as_deref() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = request.body.as_ref() {
            builder = builder.json(body);
        }
        let built = builder
            .build()
            .map_err(|source| HttpError::BuildRequestFailed { source })?;

        let response = self
            .client
            .execute(built)
            .await
            .map_err(|source| HttpError::RequestFailed { source })?;
        let status = response.status().as_u16();
        let body = read_body(response)
            .await
            .map_err(|source| HttpError::ReadBodyFailed { source })?;
        debug!("{:?} {} -> {}", request.method, request.path, status);
        Ok(ApiResponse::new(status, body))
    }
}

/// Normalizes the base so relative joins land below its path: `/api`
/// becomes `/api/`, and query or fragment are dropped.
pub(super) fn parse_base_url(raw: &str) -> Result<Url, HttpError> {
    let trimmed = raw.trim();
    let mut url = Url::parse(trimmed).map_err(|source| HttpError::InvalidBaseUrl {
        url: trimmed.to_owned(),
        source,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(HttpError::UnsupportedScheme {
            url: trimmed.to_owned(),
        });
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

pub(super) fn join_endpoint(base_url: &Url, path: &str) -> Result<Url, HttpError> {
    base_url
        .join(path.trim_start_matches('/'))
        .map_err(|source| HttpError::JoinUrlFailed {
            path: path.to_owned(),
            source,
        })
}

async fn read_body(response: reqwest::Response) -> Result<Vec<u8>, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut body = Vec::new();
    while let Some(chunk) = stream.next().await {
        body.extend_from_slice(&chunk?);
    }
    Ok(body)
}
