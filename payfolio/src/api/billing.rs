//! `/billing`: subscription state and checkout.

use crate::client::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::models::{BillingCycle, CheckoutRequest, CheckoutSession, Plan, Subscription};

impl ApiClient {
    /// # Errors
    ///
    /// Any call failure.
    pub async fn subscription(&self) -> Result<Subscription, ApiError> {
        self.call(ApiRequest::get("/billing/subscription")).await
    }

    /// Start a Stripe checkout for `plan` on `billing_cycle`.
    ///
    /// # Errors
    ///
    /// Any call failure.
    pub async fn create_checkout(
        &self,
        plan: Plan,
        billing_cycle: BillingCycle,
    ) -> Result<CheckoutSession, ApiError> {
        self.create_checkout_with(&CheckoutRequest::new(plan, billing_cycle))
            .await
    }

    /// Start a checkout with an explicit provider.
    ///
    /// # Errors
    ///
    /// 400 `ApiError::Request` for an unsupported provider.
    pub async fn create_checkout_with(
        &self,
        checkout: &CheckoutRequest,
    ) -> Result<CheckoutSession, ApiError> {
        self.call(ApiRequest::post("/billing/checkout").json(checkout)?)
            .await
    }
}
