//! Authentication payloads and the user profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::timestamp;

/// Body of `POST /auth/login`.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `POST /auth/register`.
#[derive(Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<&'a str>,
}

/// The authenticated user's profile snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub plan: String,
    pub currency: String,
    pub theme: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Changes for `PATCH /users/me`. Sent as query parameters; unset fields
/// are left alone by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub currency: Option<String>,
    pub theme: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.currency.is_none() && self.theme.is_none()
    }

    /// Query-string pairs in a stable order.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("full_name", self.full_name.as_deref()),
            ("currency", self.currency.as_deref()),
            ("theme", self.theme.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
    }
}

/// Login/register response: a fresh token pair plus the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserProfile,
}

/// Response of `POST /auth/refresh`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "bearer")]
    pub token_type: String,
}

fn bearer() -> String {
    "bearer".to_string()
}
