use reqwest::header::InvalidHeaderValue;
use thiserror::Error;

/// Everything a request can end in other than a payload.
#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced a response (connection, TLS, timeout, ...).
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    /// The API rejected the key. Such requests do not count against the rate limit.
    #[error("the API key was rejected")]
    InvalidApiKey,

    /// The API key or user agent cannot be sent as a header.
    #[error("{0}")]
    InvalidHeader(#[from] InvalidHeaderValue),

    /// No API key was configured.
    #[error("no API key given; set {0}")]
    MissingApiKey(&'static str),
}

impl Error {
    /// Returns `true` if upstream reported the API key as invalid.
    pub fn is_invalid_api_key(&self) -> bool {
        matches!(self, Error::InvalidApiKey)
    }
}
