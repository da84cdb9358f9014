//! Application builder: wires state, router and outer middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::middleware as axum_middleware;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use akademik_auth::guard::SessionGuard;
use akademik_auth::session::SessionManager;
use akademik_auth::store::IdentityStore;
use akademik_core::config::AppConfig;
use akademik_database::DatabasePool;

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the shared state over an identity store.
pub fn build_state(
    config: AppConfig,
    store: Arc<dyn IdentityStore>,
    database: Option<DatabasePool>,
) -> AppState {
    let session_manager = SessionManager::new(Arc::clone(&store), &config.auth);
    let session_guard = SessionGuard::from_config(store, &config.session);

    AppState {
        config: Arc::new(config),
        database,
        session_manager: Arc::new(session_manager),
        session_guard: Arc::new(session_guard),
    }
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let server = &state.config.server;
    let cors = build_cors_layer(&server.cors);
    let timeout = TimeoutLayer::new(Duration::from_secs(server.request_timeout_seconds));

    build_router(state)
        .layer(timeout)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(request_logging))
}
