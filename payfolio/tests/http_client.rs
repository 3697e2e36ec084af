//! End-to-end tests: real `HttpTransport` against the in-process mock backend.

mod common;

use std::sync::Arc;
use std::time::Duration;

use payfolio::models::{BillingCycle, Plan, ProfileUpdate};
use payfolio::session::{FileSessionStore, MemorySessionStore, SessionStore};
use payfolio::transport::RetryPolicy;
use payfolio::{ApiClient, ApiError, ApiRequest, ClientConfig};
use serde_json::{json, Value};
use tempfile::TempDir;
use uuid::Uuid;

fn client(base_url: &str, store: Arc<dyn SessionStore>) -> ApiClient {
    ApiClient::new(&ClientConfig::new(base_url), store).unwrap()
}

fn memory_store(token: Option<&str>) -> Arc<dyn SessionStore> {
    let store = MemorySessionStore::new();
    if let Some(token) = token {
        let mut session = store.get().unwrap();
        session.access_token = Some(token.to_string());
        store.set(&session).unwrap();
    }
    Arc::new(store)
}

#[tokio::test]
async fn login_persists_session_and_authenticates_later_calls() {
    let backend = common::spawn().await;
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    let api = client(&backend.base_url, Arc::new(FileSessionStore::at(&path)));

    let auth = api.login(common::EMAIL, common::PASSWORD).await.unwrap();
    assert_eq!(auth.access_token, "T1");
    assert_eq!(backend.state.last_authorization(), None);

    // A fresh process sees the same session.
    let reopened = client(&backend.base_url, Arc::new(FileSessionStore::at(&path)));
    let accounts = reopened.accounts().await.unwrap();

    assert_eq!(accounts.total, 1);
    assert_eq!(backend.state.last_authorization().as_deref(), Some("Bearer T1"));
}

#[tokio::test]
async fn bad_credentials_surface_server_detail() {
    let backend = common::spawn().await;
    let api = client(&backend.base_url, memory_store(None));

    let error = api.login(common::EMAIL, "wrong").await.unwrap_err();

    assert!(matches!(
        error,
        ApiError::Request { status: 401, ref message } if message == "Incorrect email or password"
    ));
    assert!(!api.session().unwrap().is_authenticated());
}

#[tokio::test]
async fn stale_token_yields_unauthorized() {
    let backend = common::spawn().await;
    backend.state.accept_token("T9");
    let api = client(&backend.base_url, memory_store(Some("stale")));

    let error = api.accounts().await.unwrap_err();

    assert!(error.is_unauthorized());
    assert_eq!(error.to_string(), "Token expired");
}

#[tokio::test]
async fn missing_token_goes_out_unauthenticated() {
    let backend = common::spawn().await;
    let api = client(&backend.base_url, memory_store(None));

    let error = api.accounts().await.unwrap_err();

    assert_eq!(error.status(), Some(401));
    assert_eq!(error.to_string(), "Not authenticated");
    assert_eq!(backend.state.last_authorization(), None);
}

#[tokio::test]
async fn listing_twice_gives_equal_results() {
    let backend = common::spawn().await;
    backend.state.accept_token("T1");
    let api = client(&backend.base_url, memory_store(Some("T1")));

    let first = api.accounts().await.unwrap();
    let second = api.accounts().await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn plain_text_failure_falls_back_to_status() {
    let backend = common::spawn().await;
    let api = client(&backend.base_url, memory_store(None));

    let error = api.call::<Value>(ApiRequest::get("/broken")).await.unwrap_err();

    assert!(matches!(
        error,
        ApiError::Request { status: 500, ref message } if message == "HTTP 500"
    ));
}

#[tokio::test]
async fn empty_failure_body_falls_back_to_status() {
    let backend = common::spawn().await;
    let api = client(&backend.base_url, memory_store(None));

    let error = api
        .call::<Value>(ApiRequest::get("/empty-error"))
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), "HTTP 502");
}

#[tokio::test]
async fn no_content_decodes_as_unit() {
    let backend = common::spawn().await;
    backend.state.accept_token("T1");
    let api = client(&backend.base_url, memory_store(Some("T1")));

    api.delete_account(Uuid::now_v7()).await.unwrap();
    let error = api.delete_account(Uuid::nil()).await.unwrap_err();

    assert_eq!(error.status(), Some(404));
}

#[tokio::test]
async fn checkout_body_reaches_server() {
    let backend = common::spawn().await;
    let api = client(&backend.base_url, memory_store(Some("T1")));

    let session = api
        .create_checkout(Plan::Pro, BillingCycle::Yearly)
        .await
        .unwrap();

    assert_eq!(session.session_id, "mock_session_123");
    assert_eq!(
        backend.state.last_body(),
        json!({"plan": "pro", "billing_cycle": "yearly", "provider": "stripe"})
    );
}

#[tokio::test]
async fn headers_on_the_wire() {
    let backend = common::spawn().await;
    let api = client(&backend.base_url, memory_store(Some("T1")));

    let request = ApiRequest::get("/echo")
        .header("X-Client", "cli")
        .header("authorization", "Bearer forged");
    let _: Value = api.call(request).await.unwrap();

    let headers = backend.state.last_headers();
    assert_eq!(headers["content-type"], "application/json");
    assert_eq!(headers["x-client"], "cli");
    assert_eq!(headers.get_all("authorization").iter().count(), 1);
    assert_eq!(headers["authorization"], "Bearer T1");
    assert!(headers["user-agent"].to_str().unwrap().starts_with("payfolio/"));
}

#[tokio::test]
async fn refresh_rotates_tokens_over_http() {
    let backend = common::spawn().await;
    let api = client(&backend.base_url, memory_store(None));
    api.login(common::EMAIL, common::PASSWORD).await.unwrap();

    api.refresh_session().await.unwrap();
    api.accounts().await.unwrap();

    assert_eq!(backend.state.last_authorization().as_deref(), Some("Bearer T3"));
    assert_eq!(api.session().unwrap().user.unwrap().email, common::EMAIL);
}

#[tokio::test]
async fn logout_notifies_server_and_removes_file() {
    let backend = common::spawn().await;
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    let api = client(&backend.base_url, Arc::new(FileSessionStore::at(&path)));
    api.login(common::EMAIL, common::PASSWORD).await.unwrap();
    assert!(path.exists());

    api.logout().await.unwrap();

    assert_eq!(*backend.state.logouts.lock().unwrap(), 1);
    assert!(!path.exists());
    assert!(!api.session().unwrap().is_authenticated());
}

#[tokio::test]
async fn profile_update_travels_in_the_query_string() {
    let backend = common::spawn().await;
    let api = client(&backend.base_url, memory_store(None));
    api.login(common::EMAIL, common::PASSWORD).await.unwrap();

    let update = ProfileUpdate {
        full_name: Some("Asha Rao".to_string()),
        currency: Some("USD".to_string()),
        theme: None,
    };
    let user = api.update_profile(&update).await.unwrap();

    assert_eq!(user.full_name.as_deref(), Some("Asha Rao"));
    assert_eq!(user.currency, "USD");
    assert_eq!(user.theme, "system");
    let stored = api.session().unwrap().user.unwrap();
    assert_eq!(stored.currency, "USD");
}

#[tokio::test]
async fn logout_succeeds_with_server_down() {
    let base_url = common::closed_port_url().await;
    let api = client(&base_url, memory_store(Some("T1")));

    api.logout().await.unwrap();

    assert!(!api.session().unwrap().is_authenticated());
}

#[tokio::test]
async fn refused_connection_is_a_network_error() {
    let base_url = common::closed_port_url().await;
    let api = client(&base_url, memory_store(Some("T1")));

    let error = api.accounts().await.unwrap_err();

    assert!(matches!(error, ApiError::Network { timed_out: false, .. }));
}

#[tokio::test]
async fn timeout_is_flagged() {
    let backend = common::spawn().await;
    let config = ClientConfig::new(&backend.base_url).with_timeout(Duration::from_millis(200));
    let api = ApiClient::new(&config, memory_store(None)).unwrap();

    let error = api.call::<Value>(ApiRequest::get("/slow")).await.unwrap_err();

    assert!(matches!(error, ApiError::Network { timed_out: true, .. }));
}

#[tokio::test]
async fn retry_decorator_gives_up_on_dead_server() {
    let base_url = common::closed_port_url().await;
    let policy = RetryPolicy {
        max_attempts: 3,
        base_delay: Duration::from_millis(5),
        max_delay: Duration::from_millis(20),
    };
    let config = ClientConfig::new(&base_url).with_retry(policy);
    let api = ApiClient::new(&config, memory_store(None)).unwrap();

    let error = api.call::<Value>(ApiRequest::get("/echo")).await.unwrap_err();

    assert!(error.is_network());
}

#[tokio::test]
async fn retry_decorator_does_not_repeat_server_errors() {
    let backend = common::spawn().await;
    let config = ClientConfig::new(&backend.base_url).with_retry(RetryPolicy::with_retries(3));
    let api = ApiClient::new(&config, memory_store(None)).unwrap();

    let error = api.call::<Value>(ApiRequest::get("/broken")).await.unwrap_err();

    assert_eq!(error.status(), Some(500));
}

#[tokio::test]
async fn concurrent_calls_share_the_client() {
    let backend = common::spawn().await;
    backend.state.accept_token("T1");
    let api = client(&backend.base_url, memory_store(Some("T1")));

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let api = api.clone();
        tasks.push(tokio::spawn(async move { api.accounts().await }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap().unwrap().total, 1);
    }

    assert_eq!(backend.state.authorization.lock().unwrap().len(), 8);
}
