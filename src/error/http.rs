use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Base URL '{url}' must use http or https.")]
    UnsupportedScheme { url: String },
    #[error("Failed to join URL '{path}': {source}")]
    JoinUrlFailed {
        path: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to build request: {source}")]
    BuildRequestFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Request failed: {source}")]
    RequestFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to read response body: {source}")]
    ReadBodyFailed {
        #[source]
        source: reqwest::Error,
    },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
}
