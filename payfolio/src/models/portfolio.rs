//! Aggregated net-worth view.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::timestamp;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioBreakdown {
    #[serde(default)]
    pub banks: Decimal,
    #[serde(default)]
    pub investments: Decimal,
    #[serde(default)]
    pub crypto: Decimal,
    #[serde(default)]
    pub wallets: Decimal,
    #[serde(default)]
    pub manual_assets: Decimal,
}

/// Response of `GET /users/me/portfolio`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub net_worth: Decimal,
    pub net_worth_change: Decimal,
    pub net_worth_change_percent: f64,
    pub total_assets: Decimal,
    pub total_liabilities: Decimal,
    pub breakdown: PortfolioBreakdown,
    pub connected_accounts: u32,
    #[serde(with = "timestamp")]
    pub last_updated: DateTime<Utc>,
}
