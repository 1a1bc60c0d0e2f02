//! HTTP transport used by source adapters.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::NetworkConfig;
use crate::error::SourceError;

/// Body of a successful (2xx) GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// `None` when the server sent no bytes.
    pub body: Option<String>,
}

/// Minimal transport capability: fetch a url and return its text body.
///
/// Retries, TLS and pooling are the implementation's business.
#[async_trait]
pub trait NetworkClient: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, SourceError>;
}

/// [`NetworkClient`] backed by a shared `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestNetworkClient {
    client: reqwest::Client,
}

impl ReqwestNetworkClient {
    pub fn new(config: &NetworkConfig) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NetworkClient for ReqwestNetworkClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, SourceError> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Network(format!("{} returned HTTP {}", url, status)));
        }
        let text = response.text().await?;
        Ok(HttpResponse {
            body: if text.is_empty() { None } else { Some(text) },
        })
    }
}
