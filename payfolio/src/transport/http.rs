//! Reqwest-backed transport.

use async_trait::async_trait;
use reqwest::Client;

use super::{OutboundRequest, RawResponse, Transport};
use crate::config::ClientConfig;
use crate::error::ApiError;

/// Production transport. Owns a pooled reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport with the config's user agent and optional timeout.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` when the reqwest client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Config(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Wrap an already configured reqwest client.
    pub const fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: OutboundRequest) -> Result<RawResponse, ApiError> {
        let mut builder = self.client.request(request.method, request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_transport_error)?;

        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn map_transport_error(error: reqwest::Error) -> ApiError {
    if error.is_builder() {
        return ApiError::Encode(error.to_string());
    }
    ApiError::Network {
        message: error.to_string(),
        timed_out: error.is_timeout(),
    }
}
