//! `/auth`: login, registration, token refresh and logout.

use tracing::debug;

use crate::client::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::models::{
    AuthResponse, LoginRequest, MessageAck, RegisterRequest, Session, TokenPair, UserProfile,
};

impl ApiClient {
    /// Exchange credentials for a session and store it.
    ///
    /// # Errors
    ///
    /// `ApiError::Request` with status 401 for bad credentials; any call or
    /// session store failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let request = ApiRequest::post("/auth/login")
            .anonymous()
            .json(&LoginRequest { email, password })?;
        let auth: AuthResponse = self.call(request).await?;
        self.session_store().set(&Session::from_auth(&auth))?;
        debug!(user = %auth.user.id, "session stored after login");
        Ok(auth)
    }

    /// Create an account and store the resulting session.
    ///
    /// # Errors
    ///
    /// `ApiError::Request` with status 400 when the email is taken; any call
    /// or session store failure.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<AuthResponse, ApiError> {
        let request = ApiRequest::post("/auth/register")
            .anonymous()
            .json(&RegisterRequest {
                email,
                password,
                full_name,
            })?;
        let auth: AuthResponse = self.call(request).await?;
        self.session_store().set(&Session::from_auth(&auth))?;
        debug!(user = %auth.user.id, "session stored after registration");
        Ok(auth)
    }

    /// Trade the stored refresh token for a new token pair.
    ///
    /// The stored user profile is kept. Calls already in flight keep the
    /// token they started with.
    ///
    /// # Errors
    ///
    /// `ApiError::MissingRefreshToken` when nothing is stored; a 401
    /// `ApiError::Request` when the refresh token is no longer valid.
    pub async fn refresh_session(&self) -> Result<TokenPair, ApiError> {
        let session = self.session()?;
        let refresh_token = session
            .refresh_token()
            .ok_or(ApiError::MissingRefreshToken)?
            .to_string();

        let request = ApiRequest::post("/auth/refresh")
            .anonymous()
            .query([("refresh_token", refresh_token.as_str())]);
        let tokens: TokenPair = self.call(request).await?;

        // Re-read so a concurrent profile update is not lost.
        let current = self.session()?;
        self.session_store().set(&current.with_tokens(&tokens))?;
        debug!("access token refreshed");
        Ok(tokens)
    }

    /// Profile of the authenticated user.
    ///
    /// # Errors
    ///
    /// Any call failure; 401 when the session is missing or expired.
    pub async fn current_user(&self) -> Result<UserProfile, ApiError> {
        self.call(ApiRequest::get("/auth/me")).await
    }

    /// End the session.
    ///
    /// The server is told when a token is held, but its answer does not
    /// matter: the local session is cleared either way.
    ///
    /// # Errors
    ///
    /// Only session store failures.
    pub async fn logout(&self) -> Result<(), ApiError> {
        if self.session()?.access_token().is_some() {
            match self.call::<MessageAck>(ApiRequest::post("/auth/logout")).await {
                Ok(ack) => debug!(message = %ack.message, "server acknowledged logout"),
                Err(error) => debug!(%error, "server logout failed; clearing session anyway"),
            }
        }
        self.session_store().clear()?;
        Ok(())
    }
}
