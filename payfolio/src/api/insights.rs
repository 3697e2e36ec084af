//! `/insights`: generated advice and its read/dismiss state.

use uuid::Uuid;

use crate::client::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::models::{GenerateOutcome, InsightList, StatusAck};

impl ApiClient {
    /// Active insights, highest priority first.
    ///
    /// # Errors
    ///
    /// Any call failure.
    pub async fn insights(&self) -> Result<InsightList, ApiError> {
        self.call(ApiRequest::get("/insights")).await
    }

    /// Ask the server to generate fresh insights.
    ///
    /// A failed generation can still come back with a success status; check
    /// [`GenerateOutcome::is_failure`].
    ///
    /// # Errors
    ///
    /// 503 `ApiError::Request` when generation is not configured server-side.
    pub async fn generate_insights(&self) -> Result<GenerateOutcome, ApiError> {
        self.call(ApiRequest::post("/insights/generate")).await
    }

    /// # Errors
    ///
    /// 404 `ApiError::Request` when the insight does not exist.
    pub async fn mark_insight_read(&self, id: Uuid) -> Result<StatusAck, ApiError> {
        self.call(ApiRequest::post(format!("/insights/{id}/read")))
            .await
    }

    /// # Errors
    ///
    /// 404 `ApiError::Request` when the insight does not exist.
    pub async fn dismiss_insight(&self, id: Uuid) -> Result<StatusAck, ApiError> {
        self.call(ApiRequest::post(format!("/insights/{id}/dismiss")))
            .await
    }
}
