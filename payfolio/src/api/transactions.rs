//! `/transactions`: paged listing, CRUD and summary statistics.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::client::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::models::query_timestamp;
use crate::models::{
    NewTransaction, Transaction, TransactionFilter, TransactionList, TransactionStats,
    TransactionUpdate,
};

impl ApiClient {
    /// One page of transactions matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Any call failure; 422 for out-of-range paging values.
    pub async fn transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<TransactionList, ApiError> {
        let request = ApiRequest::get("/transactions").query(filter.query_pairs());
        self.call(request).await
    }

    /// # Errors
    ///
    /// 404 `ApiError::Request` when the transaction does not exist.
    pub async fn transaction(&self, id: Uuid) -> Result<Transaction, ApiError> {
        self.call(ApiRequest::get(format!("/transactions/{id}"))).await
    }

    /// # Errors
    ///
    /// 404 `ApiError::Request` when the account does not exist.
    pub async fn create_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> Result<Transaction, ApiError> {
        self.call(ApiRequest::post("/transactions").json(transaction)?)
            .await
    }

    /// # Errors
    ///
    /// Any call failure.
    pub async fn update_transaction(
        &self,
        id: Uuid,
        update: &TransactionUpdate,
    ) -> Result<Transaction, ApiError> {
        self.call(ApiRequest::patch(format!("/transactions/{id}")).json(update)?)
            .await
    }

    /// # Errors
    ///
    /// Any call failure.
    pub async fn delete_transaction(&self, id: Uuid) -> Result<(), ApiError> {
        self.call(ApiRequest::delete(format!("/transactions/{id}")))
            .await
    }

    /// Income, expenses and top categories/merchants between two instants,
    /// both inclusive.
    ///
    /// # Errors
    ///
    /// Any call failure.
    pub async fn transaction_stats(
        &self,
        date_from: DateTime<Utc>,
        date_to: DateTime<Utc>,
    ) -> Result<TransactionStats, ApiError> {
        let request = ApiRequest::get("/transactions/stats/summary").query([
            ("date_from", query_timestamp(date_from)),
            ("date_to", query_timestamp(date_to)),
        ]);
        self.call(request).await
    }
}
