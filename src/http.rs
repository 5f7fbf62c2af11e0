use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, StatusCode};

use crate::{request::Request, result::Result};

/// What came back over the wire.
#[derive(Debug, Clone)]
pub struct Reply {
    /// HTTP status of the response.
    pub status: StatusCode,
    /// Undecoded response body.
    pub body: String,
}

/// Sends a [`Request`] and hands back the raw reply.
///
/// Implementations only report failures to obtain a reply at all; any
/// status code with a body is a [`Reply`].
#[async_trait]
pub trait Transport: Debug + Send + Sync {
    /// Performs the request.
    ///
    /// # Errors
    ///
    /// Returns an error if no response could be obtained.
    async fn send(&self, request: Request) -> Result<Reply>;
}

/// [`Transport`] backed by a pooled [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: ReqwestClient,
}

impl ReqwestTransport {
    /// Creates a transport with a fresh connection pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport on top of an existing client (e.g. one with timeouts or a proxy).
    pub fn with_client(http: ReqwestClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: Request) -> Result<Reply> {
        let response = self
            .http
            .request(request.method, &request.url)
            .headers(request.headers)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        Ok(Reply { status, body })
    }
}
