//! Integration tests for the auth endpoints.

mod helpers;

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_login_returns_token_and_user() {
    let app = TestApp::new();
    let user = app.users().student("2301001").await;

    let response = app
        .request(
            "POST",
            "/api/login",
            None,
            Some(json!({ "username": "2301001", "password": PASSWORD })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    let data = &response.body["data"];
    assert!(data["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(data["expires_at"].is_string());
    assert_eq!(data["user"]["id"], user.id.to_string());
    assert_eq!(data["user"]["role"], "student");
    assert_eq!(data["user"]["is_logged_in"], true);
    assert!(data["user"].get("password_hash").is_none());
    assert!(data["user"].get("current_token").is_none());
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = TestApp::new();
    app.users().student("2301002").await;

    let response = app
        .request(
            "POST",
            "/api/login",
            None,
            Some(json!({ "username": "2301002", "password": "wrong-password" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "AUTHENTICATION");

    let response = app
        .request(
            "POST",
            "/api/login",
            None,
            Some(json!({ "username": "nobody", "password": PASSWORD })),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_validates_body() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/login",
            None,
            Some(json!({ "username": "", "password": "" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION");
    assert!(response.body["details"]["username"].is_array());
}

#[tokio::test]
async fn test_me_returns_current_user() {
    let app = TestApp::new();
    let user = app.users().create("198001012005011001", akademik_entity::UserRole::Lecturer).await;
    let token = app.login("198001012005011001", PASSWORD).await;

    let response = app.request("GET", "/api/me", Some(&token), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["id"], user.id.to_string());
    assert_eq!(response.body["data"]["role"], "lecturer");
}

#[tokio::test]
async fn test_logout_clears_session() {
    let app = TestApp::new();
    let user = app.users().student("2301003").await;
    let token = app.login("2301003", PASSWORD).await;

    let response = app.request("POST", "/api/logout", Some(&token), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(!app.reload(&user).await.is_logged_in());

    let response = app.request("POST", "/api/logout", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_force_logout_requires_valid_credentials() {
    let app = TestApp::new();
    let user = app.users().student("2301004").await;
    app.login("2301004", PASSWORD).await;

    let response = app
        .request(
            "POST",
            "/api/force-logout",
            None,
            Some(json!({ "username": "2301004", "password": "guess" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "AUTHENTICATION");
    assert!(app.reload(&user).await.is_logged_in());
}

#[tokio::test]
async fn test_force_logout_by_token_in_body() {
    let app = TestApp::new();
    let user = app.users().student("2301005").await;
    let token = app.login("2301005", PASSWORD).await;

    let response = app
        .request(
            "POST",
            "/api/force-logout-by-token",
            None,
            Some(json!({ "token": token })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(!app.reload(&user).await.is_logged_in());
}

#[tokio::test]
async fn test_force_logout_by_token_rejects_missing_or_forged_token() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/force-logout-by-token", None, None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            "/api/force-logout-by-token",
            None,
            Some(json!({ "token": "forged.token.value" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_force_logout() {
    let app = TestApp::new();
    let admin = app.users().admin("admin").await;
    let student = app.users().student("2301006").await;

    let admin_token = app.login("admin", PASSWORD).await;
    let student_token = app.login("2301006", PASSWORD).await;

    let path = format!("/api/admin/users/{}/force-logout", admin.id);
    let response = app.request("POST", &path, Some(&student_token), None).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let path = format!("/api/admin/users/{}/force-logout", Uuid::new_v4());
    let response = app.request("POST", &path, Some(&admin_token), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let path = format!("/api/admin/users/{}/force-logout", student.id);
    let response = app.request("POST", &path, Some(&admin_token), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["is_logged_in"], false);

    let response = app.request("GET", "/api/me", Some(&student_token), None).await;
    assert_eq!(response.code(), Some("SESSION_EXPIRED"));
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["identity_store"], "memory");
    assert_eq!(response.body["data"]["database"], "not_configured");
}
