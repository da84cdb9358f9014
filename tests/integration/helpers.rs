//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use akademik_auth::password::PasswordHasher;
use akademik_auth::store::{IdentityStore, MemoryIdentityStore};
use akademik_core::config::{AppConfig, IdentityStoreKind};
use akademik_entity::user::{NewUser, User, UserRole};

/// Password given to every factory-built user.
pub const PASSWORD: &str = "Kedokteran#2024";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Identity store behind the app
    pub store: Arc<dyn IdentityStore>,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a test application over a fresh in-memory store.
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryIdentityStore::new()))
    }

    /// Create a test application over `store`.
    pub fn with_store(store: Arc<dyn IdentityStore>) -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.session.identity_store = IdentityStoreKind::Memory;

        let state = akademik_api::build_state(config.clone(), Arc::clone(&store), None);
        let router = akademik_api::build_app(state);

        Self {
            router,
            store,
            config,
        }
    }

    /// User factory over this app's store.
    pub fn users(&self) -> UserFactory {
        UserFactory::new(Arc::clone(&self.store))
    }

    /// Send a request through the router.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&json).unwrap())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }

    /// Log in and return the issued token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/login",
                None,
                Some(serde_json::json!({ "username": username, "password": password })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);
        response.body["data"]["token"]
            .as_str()
            .unwrap()
            .to_string()
    }

    /// Reload a user from the store.
    pub async fn reload(&self, user: &User) -> User {
        self.store.find_by_id(user.id).await.unwrap().unwrap()
    }
}

/// Simplified response for assertions.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response body as JSON
    pub body: Value,
}

impl TestResponse {
    /// The guard rejection code, if any.
    pub fn code(&self) -> Option<&str> {
        self.body["code"].as_str()
    }
}

/// Builds users with real Argon2 hashes.
pub struct UserFactory {
    store: Arc<dyn IdentityStore>,
    hasher: PasswordHasher,
}

impl UserFactory {
    /// Create a factory writing to `store`.
    pub fn new(store: Arc<dyn IdentityStore>) -> Self {
        Self {
            store,
            hasher: PasswordHasher::new(),
        }
    }

    /// Insert a logged-out user with [`PASSWORD`].
    pub async fn create(&self, username: &str, role: UserRole) -> User {
        let user = User::new(NewUser {
            username: username.to_string(),
            email: Some(format!("{username}@fk.example.ac.id")),
            password_hash: self.hasher.hash_password(PASSWORD).unwrap(),
            display_name: Some(format!("Test {username}")),
            role,
        });
        self.store.insert(&user).await.unwrap();
        user
    }

    /// Insert a student.
    pub async fn student(&self, username: &str) -> User {
        self.create(username, UserRole::Student).await
    }

    /// Insert an administrator.
    pub async fn admin(&self, username: &str) -> User {
        self.create(username, UserRole::Admin).await
    }
}
