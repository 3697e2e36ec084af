//! Loans, cards and other liabilities.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Liability {
    pub id: Uuid,
    pub name: String,
    pub liability_type: Option<String>,
    pub principal_amount: Option<Decimal>,
    pub current_balance: Decimal,
    pub interest_rate: Option<Decimal>,
    pub emi_amount: Option<Decimal>,
    pub lender: Option<String>,
    #[serde(default)]
    pub paid_percent: Option<f64>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Response of `GET /liabilities`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiabilityList {
    pub liabilities: Vec<Liability>,
    pub total_liability: Decimal,
    pub monthly_emi_total: Decimal,
}

/// Body of `POST /liabilities`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLiability {
    pub name: String,
    /// `home_loan`, `car_loan`, `personal_loan`, `credit_card`, `emi`, `bnpl` or `other`.
    pub liability_type: String,
    pub current_balance: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emi_amount: Option<Decimal>,
    /// Day of month the EMI is debited, 1..=31.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emi_day: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lender: Option<String>,
}

/// Body of `PATCH /liabilities/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiabilityUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_balance: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emi_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
