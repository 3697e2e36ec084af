//! Transactions, their filters and summary statistics.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::timestamp;

/// Direction of money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Credit,
    Debit,
    Transfer,
}

impl TransactionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
            Self::Transfer => "transfer",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credit" => Ok(Self::Credit),
            "debit" => Ok(Self::Debit),
            "transfer" => Ok(Self::Transfer),
            other => Err(format!("unknown transaction type {other:?} (credit, debit, transfer)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub account_id: Uuid,
    #[serde(default)]
    pub account_name: Option<String>,
    pub amount: Decimal,
    pub transaction_type: Option<String>,
    pub description: Option<String>,
    pub merchant_name: Option<String>,
    pub category: Option<Category>,
    #[serde(with = "timestamp")]
    pub transaction_date: DateTime<Utc>,
    pub is_recurring: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// One page of `GET /transactions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionList {
    pub transactions: Vec<Transaction>,
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}

/// Query filters for `GET /transactions`. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub account_id: Option<Uuid>,
    pub category_id: Option<i64>,
    pub transaction_type: Option<TransactionKind>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    /// Page size; the server accepts 1..=100 and defaults to 50.
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl TransactionFilter {
    /// Query-string pairs in a stable order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(id) = self.account_id {
            pairs.push(("account_id", id.to_string()));
        }
        if let Some(id) = self.category_id {
            pairs.push(("category_id", id.to_string()));
        }
        if let Some(kind) = self.transaction_type {
            pairs.push(("transaction_type", kind.as_str().to_string()));
        }
        if let Some(from) = self.date_from {
            pairs.push(("date_from", query_timestamp(from)));
        }
        if let Some(to) = self.date_to {
            pairs.push(("date_to", query_timestamp(to)));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        pairs
    }
}

/// RFC 3339 with a `Z` suffix, so no `+` needs escaping. Fractional seconds
/// are kept, so an inclusive upper bound can reach the end of a second.
pub(crate) fn query_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Body of `POST /transactions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub account_id: Uuid,
    pub amount: Decimal,
    pub transaction_type: TransactionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(with = "timestamp")]
    pub transaction_date: DateTime<Utc>,
}

/// Body of `PATCH /transactions/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Response of `GET /transactions/stats/summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionStats {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_cash_flow: Decimal,
    #[serde(default)]
    pub by_category: Vec<serde_json::Value>,
    #[serde(default)]
    pub top_merchants: Vec<serde_json::Value>,
}
