//! `/liabilities`: loans, cards and EMIs.

use uuid::Uuid;

use crate::client::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::models::{Liability, LiabilityList, LiabilityUpdate, NewLiability};

impl ApiClient {
    /// All liabilities with outstanding and monthly EMI totals.
    ///
    /// # Errors
    ///
    /// Any call failure.
    pub async fn liabilities(&self) -> Result<LiabilityList, ApiError> {
        self.call(ApiRequest::get("/liabilities")).await
    }

    /// One liability with its repayment progress.
    ///
    /// # Errors
    ///
    /// 404 `ApiError::Request` when the liability does not exist.
    pub async fn liability(&self, id: Uuid) -> Result<Liability, ApiError> {
        self.call(ApiRequest::get(format!("/liabilities/{id}")))
            .await
    }

    /// # Errors
    ///
    /// Any call failure.
    pub async fn create_liability(&self, liability: &NewLiability) -> Result<Liability, ApiError> {
        self.call(ApiRequest::post("/liabilities").json(liability)?)
            .await
    }

    /// # Errors
    ///
    /// 404 `ApiError::Request` when the liability does not exist.
    pub async fn update_liability(
        &self,
        id: Uuid,
        update: &LiabilityUpdate,
    ) -> Result<Liability, ApiError> {
        self.call(ApiRequest::patch(format!("/liabilities/{id}")).json(update)?)
            .await
    }

    /// # Errors
    ///
    /// 404 `ApiError::Request` when the liability does not exist.
    pub async fn delete_liability(&self, id: Uuid) -> Result<(), ApiError> {
        self.call(ApiRequest::delete(format!("/liabilities/{id}")))
            .await
    }
}
