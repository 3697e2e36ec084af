//! Session-aware request client.
//!
//! [`ApiClient::call`] is the single path every API operation goes through:
//! - validates the endpoint and snapshots the access token
//! - merges headers (defaults, then caller headers, then the bearer credential)
//! - sends through the configured [`Transport`]
//! - decodes JSON or maps the failure into [`ApiError`]
//!
//! The client never writes the session. Login, refresh and logout in
//! [`crate::api`] do that explicitly.

mod decode;
mod request;

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::models::Session;
use crate::session::SessionStore;
use crate::transport::{HttpTransport, OutboundRequest, RetryTransport, Transport};

pub use decode::error_message;
pub use request::ApiRequest;

const CONTENT_TYPE: &str = "Content-Type";
const AUTHORIZATION: &str = "Authorization";
const APPLICATION_JSON: &str = "application/json";

/// Typed client for the Payfolio API.
///
/// Cheap to clone; clones share the transport and session store, so calls
/// can be issued concurrently from many tasks without coordination.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

struct Inner {
    base_url: String,
    transport: Box<dyn Transport>,
    store: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Build a client that talks HTTP, wrapped in a retry decorator when
    /// `config.retry` is set.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` for an unusable base URL or HTTP client.
    pub fn new(config: &ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let http = HttpTransport::new(config)?;
        let transport: Box<dyn Transport> = match config.retry {
            Some(policy) => Box::new(RetryTransport::new(http, policy)),
            None => Box::new(http),
        };
        Self::build(&config.base_url, transport, store)
    }

    /// Build a client over any transport (test doubles, custom stacks).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` when `base_url` is not an absolute URL.
    pub fn with_transport(
        base_url: &str,
        transport: impl Transport + 'static,
        store: Arc<dyn SessionStore>,
    ) -> Result<Self, ApiError> {
        Self::build(base_url, Box::new(transport), store)
    }

    fn build(
        base_url: &str,
        transport: Box<dyn Transport>,
        store: Arc<dyn SessionStore>,
    ) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| ApiError::Config(format!("invalid base URL {base_url:?}: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::Config(format!(
                "base URL {base_url:?} cannot carry a path"
            )));
        }

        Ok(Self {
            inner: Arc::new(Inner {
                base_url: base_url.trim_end_matches('/').to_string(),
                transport,
                store,
            }),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn session_store(&self) -> &dyn SessionStore {
        self.inner.store.as_ref()
    }

    /// Current session as stored.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Session` if the store cannot be read.
    pub fn session(&self) -> Result<Session, ApiError> {
        Ok(self.inner.store.get()?)
    }

    /// Perform one call and decode the JSON body as `T`.
    ///
    /// # Errors
    ///
    /// - `ApiError::InvalidEndpoint` before any I/O if the path is not absolute
    /// - `ApiError::Network` when no response was received
    /// - `ApiError::Request` for a non-success status
    /// - `ApiError::Decode` when a success body does not decode as `T`
    pub async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let outbound = self.prepare(request)?;
        let method = outbound.method.clone();
        let path = outbound.url.path().to_string();
        let started = Instant::now();

        let response = match self.inner.transport.send(outbound).await {
            Ok(response) => response,
            Err(error) => {
                debug!(%method, %path, %error, "api call failed");
                return Err(error);
            }
        };

        debug!(
            %method,
            %path,
            status = response.status,
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "api call"
        );
        decode::decode_response(&response)
    }

    /// Like [`call`](Self::call), but gives up with `ApiError::Cancelled`
    /// as soon as `cancel` completes.
    ///
    /// # Errors
    ///
    /// Everything [`call`](Self::call) returns, plus `ApiError::Cancelled`.
    pub async fn call_with_cancel<T, C>(&self, request: ApiRequest, cancel: C) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        C: Future<Output = ()>,
    {
        tokio::select! {
            result = self.call(request) => result,
            () = cancel => Err(ApiError::Cancelled),
        }
    }

    fn prepare(&self, request: ApiRequest) -> Result<OutboundRequest, ApiError> {
        let ApiRequest {
            endpoint,
            method,
            body,
            headers: extra_headers,
            authenticated,
        } = request;

        if !endpoint.starts_with('/') {
            return Err(ApiError::InvalidEndpoint(endpoint));
        }

        // Snapshot: session changes after this point do not affect this call.
        let token = if authenticated {
            self.inner.store.get()?.access_token().map(str::to_owned)
        } else {
            None
        };

        let mut headers = vec![(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())];
        for (name, value) in extra_headers {
            set_header(&mut headers, name, value);
        }
        if let Some(token) = token {
            set_header(
                &mut headers,
                AUTHORIZATION.to_string(),
                format!("Bearer {token}"),
            );
        }

        let url = Url::parse(&format!("{}{endpoint}", self.inner.base_url))
            .map_err(|e| ApiError::InvalidEndpoint(format!("{endpoint}: {e}")))?;

        Ok(OutboundRequest {
            method,
            url,
            headers,
            body,
        })
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

/// Insert or replace a header, comparing names case-insensitively.
fn set_header(headers: &mut Vec<(String, String)>, name: String, value: String) {
    headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
    headers.push((name, value));
}
