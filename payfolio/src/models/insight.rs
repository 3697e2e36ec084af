//! Generated financial insights.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub id: Uuid,
    pub insight_type: String,
    pub title: String,
    pub description: String,
    /// `info`, `warning` or `critical`.
    pub severity: String,
    pub priority: i32,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    pub cta_text: Option<String>,
    pub cta_link: Option<String>,
    pub is_read: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Response of `GET /insights`, ordered by priority then recency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightList {
    pub insights: Vec<Insight>,
    pub unread_count: u64,
}

/// Response of `POST /insights/generate`.
///
/// Generation failures on the server come back as a success status with
/// `error` set, so callers must check it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateOutcome {
    pub message: String,
    #[serde(default)]
    pub error: Option<String>,
}

impl GenerateOutcome {
    pub const fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}
