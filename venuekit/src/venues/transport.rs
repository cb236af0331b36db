//! `reqwest`-backed transport.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use tracing::debug;

use super::config::VenueClientConfig;
use super::protocols::{DeleteTransport, TransportResponse};
use crate::errors::VenueError;

/// Sends delete requests over HTTP.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds a transport from the user agent, headers and timeout in `config`.
    pub fn new(config: &VenueClientConfig) -> Result<Self, VenueError> {
        let mut headers = HeaderMap::new();
        for (key, value) in &config.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| VenueError::Config(format!("invalid header name {key}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| VenueError::Config(format!("invalid header value for {key}: {e}")))?;
            headers.insert(name, value);
        }

        let mut builder = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers);
        if let Some(timeout) = config.timeout()? {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| VenueError::Config(format!("failed to build http client: {e}")))?;
        Ok(Self { client })
    }

    /// Wraps an existing client.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DeleteTransport for ReqwestTransport {
    async fn delete(&self, url: &str) -> Result<TransportResponse, VenueError> {
        let url = reqwest::Url::parse(url).map_err(|e| VenueError::InvalidUrl(format!("{url}: {e}")))?;

        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(|e| VenueError::Network(e.to_string()))?;

        let status_code = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| VenueError::Network(e.to_string()))?;

        debug!(status_code, final_url = %final_url, body_len = body.len(), "DELETE completed");

        Ok(TransportResponse::new(status_code, body))
    }
}
