//! Per-call request descriptor.

use reqwest::Method;
use serde::Serialize;

use crate::error::ApiError;

/// What to call: endpoint path, method, optional JSON body, extra headers.
///
/// Built fresh for every call and consumed by
/// [`ApiClient::call`](crate::ApiClient::call).
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub(crate) endpoint: String,
    pub(crate) method: Method,
    pub(crate) body: Option<Vec<u8>>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) authenticated: bool,
}

impl ApiRequest {
    /// A `GET` request for `endpoint` (a path starting with `/`).
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: Method::GET,
            body: None,
            headers: Vec::new(),
            authenticated: true,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint).method(Method::POST)
    }

    pub fn patch(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint).method(Method::PATCH)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint).method(Method::DELETE)
    }

    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Attach `body` serialized as JSON.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Encode` if `body` cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let encoded = serde_json::to_vec(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = Some(encoded);
        Ok(self)
    }

    /// Add a header. Later values for the same name win.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Append percent-encoded query parameters to the endpoint.
    #[must_use]
    pub fn query<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in pairs {
            let separator = if self.endpoint.contains('?') { '&' } else { '?' };
            self.endpoint.push(separator);
            self.endpoint.push_str(&urlencoding::encode(key.as_ref()));
            self.endpoint.push('=');
            self.endpoint.push_str(&urlencoding::encode(value.as_ref()));
        }
        self
    }

    /// Send without the session credential (login, register, refresh).
    #[must_use]
    pub fn anonymous(mut self) -> Self {
        self.authenticated = false;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub const fn http_method(&self) -> &Method {
        &self.method
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}
