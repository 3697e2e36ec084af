//! Session model: the token pair and user snapshot held by the client.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{AuthResponse, TokenPair, UserProfile};

/// The credentials of the current authenticated user.
///
/// Persisted under the fixed keys `access_token`, `refresh_token` and
/// `user`. A default session has no tokens and sends calls unauthenticated.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

impl Session {
    /// Build the session created by a successful login or registration.
    pub fn from_auth(auth: &AuthResponse) -> Self {
        Self {
            access_token: Some(auth.access_token.clone()),
            refresh_token: Some(auth.refresh_token.clone()),
            user: Some(auth.user.clone()),
        }
    }

    /// Replace the token pair, keeping the user snapshot.
    #[must_use]
    pub fn with_tokens(self, tokens: &TokenPair) -> Self {
        Self {
            access_token: Some(tokens.access_token.clone()),
            refresh_token: Some(tokens.refresh_token.clone()),
            user: self.user,
        }
    }

    /// The access token, if one is stored. Empty strings count as absent.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }

    /// The refresh token, if one is stored. Empty strings count as absent.
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }
}

// Tokens never reach logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |token: &Option<String>| token.as_ref().map(|_| "<redacted>");
        f.debug_struct("Session")
            .field("access_token", &redact(&self.access_token))
            .field("refresh_token", &redact(&self.refresh_token))
            .field("user", &self.user.as_ref().map(|u| u.id))
            .finish()
    }
}
