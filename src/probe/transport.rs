// src/probe/transport.rs
use async_trait::async_trait;
use reqwest::{header, redirect, Client, ClientBuilder, StatusCode};
use std::time::Duration;
use url::Url;

/// A single outbound request as the prober builds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    pub url: Url,
    pub user_agent: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: StatusCode,
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Request timeout")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Failed to build HTTP client: {0}")]
    Build(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

/// Sends one request and reports the status, or why no response came back.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: ProbeRequest) -> Result<ProbeResponse, TransportError>;
}

/// `reqwest` backed transport. Redirects are never followed. The inner client
/// is the connection pool and can be shared between probers.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        Self::from_builder(Client::builder())
    }

    /// Build from a caller-tuned builder (proxy, TLS roots, pool sizing).
    /// Any redirect policy set on it is replaced with `Policy::none()`.
    pub fn from_builder(builder: ClientBuilder) -> Result<Self, TransportError> {
        let client = builder
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ProbeRequest) -> Result<ProbeResponse, TransportError> {
        let response = self
            .client
            .get(request.url)
            .header(header::USER_AGENT, request.user_agent)
            .timeout(request.timeout)
            .send()
            .await?;

        Ok(ProbeResponse {
            status: response.status(),
        })
    }
}
