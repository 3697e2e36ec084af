//! Linked financial accounts.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::timestamp;

/// A bank, wallet, investment or manual account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub institution: Option<String>,
    pub account_type: Option<String>,
    pub current_balance: Decimal,
    pub currency: String,
    pub connection_type: String,
    #[serde(default, with = "timestamp::option")]
    pub last_synced_at: Option<DateTime<Utc>>,
    pub sync_status: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Response of `GET /accounts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountList {
    pub accounts: Vec<Account>,
    pub total: u64,
    /// Number of accounts per account type name.
    #[serde(default)]
    pub by_type: BTreeMap<String, u64>,
}

/// Body of `POST /accounts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAccount {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    pub account_type: String,
    pub current_balance: Decimal,
    pub currency: String,
}

impl NewAccount {
    /// A manual bank account with a zero INR balance.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            institution: None,
            account_type: "bank".to_string(),
            current_balance: Decimal::ZERO,
            currency: "INR".to_string(),
        }
    }
}

/// Body of `PATCH /accounts/{id}`. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_balance: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_hidden: Option<bool>,
}

/// Response of `POST /accounts/{id}/sync`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncResult {
    pub message: String,
    #[serde(default, with = "timestamp::option")]
    pub last_synced_at: Option<DateTime<Utc>>,
}
