//! The transport seam between [`PoolClient`](super::PoolClient) and HTTP.
//!
//! The client builds a [`PoolRequest`] and hands it to a [`Transport`]. The
//! shipped [`HttpTransport`] speaks HTTP through `reqwest`; tests substitute
//! an in-memory transport.

use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::envelope::ResponseEnvelope;
use crate::config::PoolConfig;
use crate::error::PoolError;

/// HTTP method of a pool request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// One call against the pool service. `path` is relative to the base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl PoolRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// Appends one query pair.
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Value of the first query pair named `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Sends pool requests and decodes the response envelope.
///
/// Implementations must not retry on their own and must not inspect the
/// envelope code; that is the client's job.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, request: PoolRequest) -> Result<ResponseEnvelope, PoolError>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: PoolConfig,
}

impl HttpTransport {
    /// Builds the HTTP client with the configured timeout.
    pub fn new(config: PoolConfig) -> Result<Self, PoolError> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| PoolError::Transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, request: PoolRequest) -> Result<ResponseEnvelope, PoolError> {
        let url = self.config.endpoint(&request.path);
        debug!(method = %request.method, %url, "sending pool request");

        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        let builder = builder.query(&request.query);
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                PoolError::Transport("request timed out".to_string())
            } else {
                PoolError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| PoolError::Transport(e.to_string()))?;

        serde_json::from_slice::<ResponseEnvelope>(&bytes).map_err(|e| {
            PoolError::protocol(format!(
                "undecodable response envelope (HTTP {}): {}",
                status, e
            ))
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
