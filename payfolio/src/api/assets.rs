//! `/assets`: manually tracked assets.

use uuid::Uuid;

use crate::client::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::models::{Asset, AssetUpdate, NewAsset};

impl ApiClient {
    /// # Errors
    ///
    /// Any call failure.
    pub async fn assets(&self) -> Result<Vec<Asset>, ApiError> {
        self.call(ApiRequest::get("/assets")).await
    }

    /// One asset with its computed gain.
    ///
    /// # Errors
    ///
    /// 404 `ApiError::Request` when the asset does not exist.
    pub async fn asset(&self, id: Uuid) -> Result<Asset, ApiError> {
        self.call(ApiRequest::get(format!("/assets/{id}"))).await
    }

    /// # Errors
    ///
    /// 422 `ApiError::Request` for an unknown asset type.
    pub async fn create_asset(&self, asset: &NewAsset) -> Result<Asset, ApiError> {
        self.call(ApiRequest::post("/assets").json(asset)?).await
    }

    /// # Errors
    ///
    /// 404 `ApiError::Request` when the asset does not exist.
    pub async fn update_asset(&self, id: Uuid, update: &AssetUpdate) -> Result<Asset, ApiError> {
        self.call(ApiRequest::patch(format!("/assets/{id}")).json(update)?)
            .await
    }

    /// # Errors
    ///
    /// 404 `ApiError::Request` when the asset does not exist.
    pub async fn delete_asset(&self, id: Uuid) -> Result<(), ApiError> {
        self.call(ApiRequest::delete(format!("/assets/{id}"))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fixtures;
    use chrono::TimeZone;
    use chrono::Utc;
    use reqwest::Method;
    use rust_decimal::Decimal;
    use serde_json::json;

    const ASSET_ID: &str = "01926f3b-1111-7222-8333-444455556666";

    fn asset() -> serde_json::Value {
        json!({
            "id": ASSET_ID,
            "name": "Gold coins",
            "asset_type": "gold",
            "current_value": "52000.00",
            "purchase_value": "40000.00",
            "gain": "12000.00",
            "gain_percent": 30.0,
            "created_at": "2024-12-01T10:00:00"
        })
    }

    #[tokio::test]
    async fn list_is_a_bare_array() {
        let (api, transport, _store) = fixtures::client(Some("T1"));
        transport.respond_json(200, &json!([asset()]));

        let assets = api.assets().await.unwrap();

        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].gain, Some(Decimal::new(1_200_000, 2)));
        assert_eq!(transport.last_request().url.path(), "/v1/assets");
    }

    #[tokio::test]
    async fn show_fetches_one_asset() {
        let (api, transport, _store) = fixtures::client(Some("T1"));
        transport.respond_json(200, &asset());
        let id: Uuid = ASSET_ID.parse().unwrap();

        let asset = api.asset(id).await.unwrap();

        let sent = transport.last_request();
        assert_eq!(sent.method, Method::GET);
        assert_eq!(sent.url.path(), format!("/v1/assets/{ASSET_ID}"));
        assert_eq!(asset.id, id);
        assert_eq!(asset.gain_percent, Some(30.0));
    }

    #[tokio::test]
    async fn show_reports_missing_asset() {
        let (api, transport, _store) = fixtures::client(Some("T1"));
        transport.respond(404, r#"{"detail":"Asset not found"}"#);

        let error = api.asset(Uuid::now_v7()).await.unwrap_err();

        assert!(matches!(
            error,
            ApiError::Request { status: 404, ref message } if message == "Asset not found"
        ));
    }

    #[tokio::test]
    async fn create_serializes_purchase_date() {
        let (api, transport, _store) = fixtures::client(Some("T1"));
        transport.respond_json(201, &asset());

        let new = NewAsset {
            name: "Gold coins".to_string(),
            asset_type: "gold".to_string(),
            current_value: Decimal::new(52_000, 0),
            purchase_value: Some(Decimal::new(40_000, 0)),
            purchase_date: Some(Utc.with_ymd_and_hms(2023, 4, 22, 0, 0, 0).unwrap()),
            notes: None,
        };
        api.create_asset(&new).await.unwrap();

        let body = transport.last_body();
        assert_eq!(body["purchase_date"], json!("2023-04-22T00:00:00+00:00"));
        assert_eq!(body["current_value"], json!("52000"));
        assert!(body.get("notes").is_none());
    }

    #[tokio::test]
    async fn update_and_delete_address_the_asset() {
        let (api, transport, _store) = fixtures::client(Some("T1"));
        transport.respond_json(200, &asset());
        transport.respond(204, "");
        let id: Uuid = ASSET_ID.parse().unwrap();

        let update = AssetUpdate {
            current_value: Some(Decimal::new(55_000, 0)),
            ..AssetUpdate::default()
        };
        api.update_asset(id, &update).await.unwrap();
        api.delete_asset(id).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::PATCH);
        assert_eq!(requests[1].method, Method::DELETE);
        assert_eq!(requests[1].url.path(), format!("/v1/assets/{ASSET_ID}"));
    }
}
