//! End-to-end tests for single-active-session enforcement.

mod helpers;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use akademik_auth::store::{IdentityStore, MemoryIdentityStore};
use akademik_core::error::AppError;
use akademik_core::result::AppResult;
use akademik_entity::User;

use helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_request_without_identity_is_unauthenticated() {
    let app = TestApp::new();

    for token in [None, Some("not-a-token")] {
        let response = app.request("GET", "/api/me", token, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body, json!({ "message": "Unauthenticated." }));
    }
}

#[tokio::test]
async fn test_current_token_passes_without_changing_state() {
    let app = TestApp::new();
    let user = app.users().student("2201001").await;
    let token = app.login("2201001", PASSWORD).await;
    let before = app.reload(&user).await;

    let response = app.request("GET", "/api/me", Some(&token), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["username"], "2201001");

    assert_eq!(app.reload(&user).await, before);
}

#[tokio::test]
async fn test_second_login_ends_first_device() {
    let app = TestApp::new();
    let user = app.users().student("2201002").await;

    let laptop = app.login("2201002", PASSWORD).await;
    let phone = app.login("2201002", PASSWORD).await;

    let response = app.request("GET", "/api/me", Some(&laptop), None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.code(), Some("DEVICE_CONFLICT"));
    assert_eq!(
        response.body["message"],
        "This account is in use on another device. You have been logged out."
    );

    // The conflict logs the account out everywhere.
    let stored = app.reload(&user).await;
    assert!(!stored.is_logged_in());
    assert_eq!(stored.current_token(), None);

    let response = app.request("GET", "/api/me", Some(&phone), None).await;
    assert_eq!(response.code(), Some("SESSION_EXPIRED"));
}

#[tokio::test]
async fn test_logged_out_account_is_expired() {
    let app = TestApp::new();
    app.users().student("2201003").await;
    let token = app.login("2201003", PASSWORD).await;

    let response = app.request("POST", "/api/logout", Some(&token), None).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", "/api/me", Some(&token), None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.code(), Some("SESSION_EXPIRED"));
    assert_eq!(
        response.body["message"],
        "Your session has ended. Please log in again."
    );
}

#[tokio::test]
async fn test_repeated_stale_requests_stay_logged_out() {
    let app = TestApp::new();
    let user = app.users().student("2201004").await;
    let stale = app.login("2201004", PASSWORD).await;
    app.login("2201004", PASSWORD).await;

    let first = app.request("GET", "/api/me", Some(&stale), None).await;
    assert_eq!(first.code(), Some("DEVICE_CONFLICT"));

    let second = app.request("GET", "/api/me", Some(&stale), None).await;
    assert_eq!(second.code(), Some("SESSION_EXPIRED"));

    assert!(!app.reload(&user).await.is_logged_in());
}

#[tokio::test]
async fn test_force_logout_reachable_from_invalidated_session() {
    let app = TestApp::new();
    let user = app.users().student("2201005").await;
    let stale = app.login("2201005", PASSWORD).await;
    app.login("2201005", PASSWORD).await;

    let response = app.request("GET", "/api/me", Some(&stale), None).await;
    assert_eq!(response.code(), Some("DEVICE_CONFLICT"));

    // Same stale token, but the guard lets force-logout through.
    let response = app
        .request(
            "POST",
            "/api/force-logout",
            Some(&stale),
            Some(json!({ "username": "2201005", "password": PASSWORD })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("POST", "/api/force-logout-by-token", Some(&stale), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // A fresh login works afterwards.
    let token = app.login("2201005", PASSWORD).await;
    let response = app.request("GET", "/api/me", Some(&token), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.reload(&user).await.current_token(), Some(token.as_str()));
}

#[tokio::test]
async fn test_force_logout_ends_live_session_on_other_device() {
    let app = TestApp::new();
    app.users().student("2201006").await;
    let token = app.login("2201006", PASSWORD).await;

    let response = app
        .request(
            "POST",
            "/api/force-logout",
            None,
            Some(json!({ "username": "2201006", "password": PASSWORD })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", "/api/me", Some(&token), None).await;
    assert_eq!(response.code(), Some("SESSION_EXPIRED"));
}

/// Memory store whose writes can be switched off.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryIdentityStore,
    fail_writes: AtomicBool,
}

#[async_trait]
impl IdentityStore for FlakyStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.inner.find_by_username(username).await
    }

    async fn insert(&self, user: &User) -> AppResult<()> {
        self.inner.insert(user).await
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::database("connection reset"));
        }
        self.inner.save(user).await
    }

    async fn revoke_session(&self, id: Uuid) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::database("connection reset"));
        }
        self.inner.revoke_session(id).await
    }
}

#[tokio::test]
async fn test_failed_revocation_is_service_unavailable() {
    let store = Arc::new(FlakyStore::default());
    let app = TestApp::with_store(store.clone());
    let user = app.users().student("2201007").await;

    let stale = app.login("2201007", PASSWORD).await;
    let current = app.login("2201007", PASSWORD).await;
    store.fail_writes.store(true, Ordering::SeqCst);

    let response = app.request("GET", "/api/me", Some(&stale), None).await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["error"], "SERVICE_UNAVAILABLE");
    assert_eq!(response.code(), None);

    // Nothing was recorded, so the current device is unaffected.
    assert_eq!(
        app.reload(&user).await.current_token(),
        Some(current.as_str())
    );
}
