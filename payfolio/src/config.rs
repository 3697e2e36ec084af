//! Client configuration.

use std::time::Duration;

use crate::transport::RetryPolicy;

/// Backend root the web app's `/api/v1` proxy forwards to.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/v1";

const DEFAULT_USER_AGENT: &str = concat!("payfolio/", env!("CARGO_PKG_VERSION"));

/// Settings for building an [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root; endpoint paths are appended to it verbatim.
    pub base_url: String,
    /// Whole-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    pub user_agent: String,
    /// Wrap the transport in a [`RetryTransport`](crate::transport::RetryTransport).
    pub retry: Option<RetryPolicy>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retry: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }
}
