//! In-process mock of the Payfolio backend for integration tests.
//!
//! Serves a handful of `/v1` routes on `127.0.0.1:0` and records what it
//! receives so tests can assert on the wire-level request.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use uuid::Uuid;

pub const EMAIL: &str = "a@b.com";
pub const PASSWORD: &str = "x";

/// What the mock saw, plus the token it currently accepts.
#[derive(Default)]
pub struct BackendState {
    pub valid_token: Mutex<Option<String>>,
    pub authorization: Mutex<Vec<Option<String>>>,
    pub headers: Mutex<Vec<HeaderMap>>,
    pub bodies: Mutex<Vec<Value>>,
    pub logouts: Mutex<u32>,
}

impl BackendState {
    pub fn accept_token(&self, token: &str) {
        *self.valid_token.lock().unwrap() = Some(token.to_string());
    }

    pub fn last_authorization(&self) -> Option<String> {
        self.authorization.lock().unwrap().last().cloned().flatten()
    }

    pub fn last_headers(&self) -> HeaderMap {
        self.headers.lock().unwrap().last().cloned().unwrap()
    }

    pub fn last_body(&self) -> Value {
        self.bodies.lock().unwrap().last().cloned().unwrap()
    }

    fn record(&self, headers: &HeaderMap) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        self.authorization.lock().unwrap().push(auth);
        self.headers.lock().unwrap().push(headers.clone());
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        let expected = self
            .valid_token
            .lock()
            .unwrap()
            .as_ref()
            .map(|t| format!("Bearer {t}"));
        let sent = headers.get("authorization").and_then(|v| v.to_str().ok());
        expected.is_some() && sent == expected.as_deref()
    }
}

pub struct MockBackend {
    pub base_url: String,
    pub state: Arc<BackendState>,
}

type Shared = State<Arc<BackendState>>;

pub async fn spawn() -> MockBackend {
    let state = Arc::new(BackendState::default());

    let app = Router::new()
        .route("/v1/auth/login", post(login))
        .route("/v1/auth/refresh", post(refresh))
        .route("/v1/auth/logout", post(logout))
        .route("/v1/users/me", patch(update_me))
        .route("/v1/accounts", get(list_accounts))
        .route("/v1/accounts/{id}", delete(delete_account))
        .route("/v1/billing/checkout", post(checkout))
        .route("/v1/echo", get(echo))
        .route("/v1/broken", get(broken))
        .route("/v1/empty-error", get(empty_error))
        .route("/v1/slow", get(slow))
        .with_state(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockBackend {
        base_url: format!("http://{addr}/v1"),
        state,
    }
}

/// A base URL nothing is listening on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/v1")
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

fn user() -> Value {
    json!({
        "id": Uuid::now_v7(),
        "email": EMAIL,
        "full_name": null,
        "plan": "free",
        "currency": "INR",
        "theme": "system",
        "created_at": "2025-01-10T12:00:00.000123"
    })
}

async fn login(State(state): Shared, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    state.record(&headers);
    state.bodies.lock().unwrap().push(body.clone());
    if body["email"] != EMAIL || body["password"] != PASSWORD {
        return detail(StatusCode::UNAUTHORIZED, "Incorrect email or password");
    }
    state.accept_token("T1");
    Json(json!({
        "access_token": "T1",
        "refresh_token": "T2",
        "user": user()
    }))
    .into_response()
}

async fn refresh(
    State(state): Shared,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.record(&headers);
    if params.get("refresh_token").map(String::as_str) != Some("T2") {
        return detail(StatusCode::UNAUTHORIZED, "Invalid refresh token");
    }
    state.accept_token("T3");
    Json(json!({
        "access_token": "T3",
        "refresh_token": "T4",
        "token_type": "bearer"
    }))
    .into_response()
}

async fn logout(State(state): Shared, headers: HeaderMap) -> Response {
    state.record(&headers);
    *state.logouts.lock().unwrap() += 1;
    Json(json!({ "message": "Successfully logged out" })).into_response()
}

// Profile fields arrive as query parameters; a JSON body is ignored.
async fn update_me(
    State(state): Shared,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.record(&headers);
    if !state.authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Not authenticated");
    }
    let mut updated = user();
    for field in ["full_name", "currency", "theme"] {
        if let Some(value) = params.get(field) {
            updated[field] = json!(value);
        }
    }
    Json(updated).into_response()
}

async fn list_accounts(State(state): Shared, headers: HeaderMap) -> Response {
    state.record(&headers);
    if headers.get("authorization").is_none() {
        return detail(StatusCode::UNAUTHORIZED, "Not authenticated");
    }
    if !state.authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Token expired");
    }
    Json(json!({
        "accounts": [{
            "id": "01926f3a-7c1e-7a3b-9d44-2f1e8c0b5a61",
            "name": "HDFC Savings",
            "institution": "HDFC Bank",
            "account_type": "bank",
            "current_balance": "125000.50",
            "currency": "INR",
            "connection_type": "manual",
            "last_synced_at": null,
            "sync_status": "synced",
            "created_at": "2024-11-02T09:15:00"
        }],
        "total": 1,
        "by_type": { "bank": 1 }
    }))
    .into_response()
}

async fn delete_account(State(state): Shared, headers: HeaderMap, Path(id): Path<Uuid>) -> Response {
    state.record(&headers);
    if !state.authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Not authenticated");
    }
    if id.is_nil() {
        return detail(StatusCode::NOT_FOUND, "Account not found");
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn checkout(State(state): Shared, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    state.record(&headers);
    state.bodies.lock().unwrap().push(body.clone());
    Json(json!({
        "checkout_url": "https://checkout.stripe.com/pay/mock_session_123",
        "session_id": "mock_session_123"
    }))
    .into_response()
}

async fn echo(State(state): Shared, headers: HeaderMap) -> Json<Value> {
    state.record(&headers);
    Json(json!({ "ok": true }))
}

async fn broken() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

async fn empty_error() -> StatusCode {
    StatusCode::BAD_GATEWAY
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!({ "late": true }))
}
