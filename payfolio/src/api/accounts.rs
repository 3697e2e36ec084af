//! `/accounts`: linked and manual accounts.

use uuid::Uuid;

use crate::client::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::models::{Account, AccountList, AccountUpdate, NewAccount, SyncResult};

impl ApiClient {
    /// All visible accounts with per-type counts.
    ///
    /// # Errors
    ///
    /// Any call failure.
    pub async fn accounts(&self) -> Result<AccountList, ApiError> {
        self.call(ApiRequest::get("/accounts")).await
    }

    /// # Errors
    ///
    /// 404 `ApiError::Request` when the account does not exist.
    pub async fn account(&self, id: Uuid) -> Result<Account, ApiError> {
        self.call(ApiRequest::get(format!("/accounts/{id}"))).await
    }

    /// # Errors
    ///
    /// 402 `ApiError::Request` when the plan's account limit is reached.
    pub async fn create_account(&self, account: &NewAccount) -> Result<Account, ApiError> {
        self.call(ApiRequest::post("/accounts").json(account)?).await
    }

    /// # Errors
    ///
    /// Any call failure.
    pub async fn update_account(
        &self,
        id: Uuid,
        update: &AccountUpdate,
    ) -> Result<Account, ApiError> {
        self.call(ApiRequest::patch(format!("/accounts/{id}")).json(update)?)
            .await
    }

    /// # Errors
    ///
    /// Any call failure.
    pub async fn delete_account(&self, id: Uuid) -> Result<(), ApiError> {
        self.call(ApiRequest::delete(format!("/accounts/{id}"))).await
    }

    /// Ask the server to re-sync a connected account.
    ///
    /// # Errors
    ///
    /// 400 `ApiError::Request` for manual accounts.
    pub async fn sync_account(&self, id: Uuid) -> Result<SyncResult, ApiError> {
        self.call(ApiRequest::post(format!("/accounts/{id}/sync")))
            .await
    }
}
