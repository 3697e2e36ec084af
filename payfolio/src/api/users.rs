//! `/users/me`: the caller's profile and aggregates.

use tracing::debug;

use crate::client::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::models::{Portfolio, ProfileUpdate, UserProfile};

impl ApiClient {
    /// The caller's profile, as `GET /users/me` returns it.
    ///
    /// # Errors
    ///
    /// Any call failure; 401 when the session is missing or expired.
    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        self.call(ApiRequest::get("/users/me")).await
    }

    /// Change display name, currency or theme.
    ///
    /// The server reads these from the query string, not the body. The stored
    /// user snapshot is replaced with the server's answer.
    ///
    /// # Errors
    ///
    /// Any call failure, or a session store failure after success.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        let request = ApiRequest::patch("/users/me").query(update.query_pairs());
        let user: UserProfile = self.call(request).await?;

        let mut session = self.session()?;
        if session.is_authenticated() {
            session.user = Some(user.clone());
            self.session_store().set(&session)?;
            debug!(user = %user.id, "stored profile updated");
        }
        Ok(user)
    }

    /// Permanently delete the caller's account, then clear the local session.
    ///
    /// # Errors
    ///
    /// Any call failure, in which case the session is kept.
    pub async fn delete_user(&self) -> Result<(), ApiError> {
        self.call::<()>(ApiRequest::delete("/users/me")).await?;
        self.session_store().clear()?;
        debug!("account deleted; session cleared");
        Ok(())
    }

    /// Net worth, totals and per-category breakdown.
    ///
    /// # Errors
    ///
    /// Any call failure.
    pub async fn portfolio(&self) -> Result<Portfolio, ApiError> {
        self.call(ApiRequest::get("/users/me/portfolio")).await
    }
}
