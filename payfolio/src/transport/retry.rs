//! Opt-in retry decorator for transient transport failures.

use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use super::{OutboundRequest, RawResponse, Transport};
use crate::error::ApiError;

/// How many times to try and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first. `1` disables retrying.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Policy with `retries` extra attempts and default delays.
    pub fn with_retries(retries: u32) -> Self {
        Self {
            max_attempts: retries.saturating_add(1),
            ..Self::default()
        }
    }

    /// Delay before retry number `retry` (0-based): `base * 2^retry`, capped.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.checked_pow(retry).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Retries [`ApiError::Network`] failures of the wrapped transport.
///
/// Only idempotent methods are retried. A `POST` or `PATCH` that timed out
/// may already have been applied, so its first failure is returned as-is.
/// Anything the server answered, success or failure status, is returned
/// on the first attempt.
#[derive(Debug, Clone)]
pub struct RetryTransport<T> {
    inner: T,
    policy: RetryPolicy,
}

impl<T: Transport> RetryTransport<T> {
    pub const fn new(inner: T, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

#[async_trait]
impl<T: Transport> Transport for RetryTransport<T> {
    async fn send(&self, request: OutboundRequest) -> Result<RawResponse, ApiError> {
        let attempts = if request.method.is_idempotent() {
            self.policy.max_attempts.max(1)
        } else {
            1
        };
        let mut retry = 0;

        loop {
            match self.inner.send(request.clone()).await {
                Err(error) if error.is_network() && retry + 1 < attempts => {
                    let delay = self.policy.delay_for(retry);
                    warn!(
                        method = %request.method,
                        path = request.url.path(),
                        attempt = retry + 1,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        %error,
                        "retrying after network error"
                    );
                    tokio::time::sleep(delay).await;
                    retry += 1;
                }
                outcome => return outcome,
            }
        }
    }
}
