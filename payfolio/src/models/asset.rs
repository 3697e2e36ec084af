//! Manually tracked assets (property, vehicles, gold, collectibles).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: Uuid,
    pub name: String,
    pub asset_type: Option<String>,
    pub current_value: Decimal,
    pub purchase_value: Option<Decimal>,
    /// Computed by the server when a purchase value is known.
    #[serde(default)]
    pub gain: Option<Decimal>,
    #[serde(default)]
    pub gain_percent: Option<f64>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /assets`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAsset {
    pub name: String,
    /// One of `real_estate`, `vehicle`, `gold`, `collectible`, `other`.
    pub asset_type: String,
    pub current_value: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_value: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "timestamp::option"
    )]
    pub purchase_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body of `PATCH /assets/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_value: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
