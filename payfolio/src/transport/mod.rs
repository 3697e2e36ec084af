//! The seam between the API client and the wire.
//!
//! The client builds an [`OutboundRequest`] and hands it to a [`Transport`].
//! [`HttpTransport`] speaks HTTP via reqwest; [`RetryTransport`] is an
//! opt-in decorator around any other transport.

mod http;
mod retry;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, Url};

use crate::error::ApiError;

pub use http::HttpTransport;
pub use retry::{RetryPolicy, RetryTransport};

/// A fully resolved request: absolute URL, final headers, encoded body.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl OutboundRequest {
    /// Header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status and raw body of whatever the server sent back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Sends one request and returns the server's answer.
///
/// Implementations return `Ok` for every response the server produced,
/// whatever its status. `Err` is reserved for failures to get a response.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: OutboundRequest) -> Result<RawResponse, ApiError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: OutboundRequest) -> Result<RawResponse, ApiError> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn send(&self, request: OutboundRequest) -> Result<RawResponse, ApiError> {
        (**self).send(request).await
    }
}
