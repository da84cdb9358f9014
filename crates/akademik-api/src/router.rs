//! Route definitions for the Akademik HTTP API.
//!
//! Everything except login and health runs behind the authentication
//! middleware and the session guard. The force-logout routes are guarded
//! too; the guard lets them through by path.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware::{activity, authenticate, session_guard};
use crate::state::AppState;

/// Build the Axum router with all routes and per-route middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(guarded_routes(&state))
        .merge(public_routes());

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
}

/// Login and health: no identity needed.
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/health", get(handlers::health::health))
}

/// Routes behind authentication and the session guard.
///
/// Route layers run last-added first: authenticate, then the guard, then
/// activity tracking.
fn guarded_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/logout", post(handlers::auth::logout))
        .route("/me", get(handlers::auth::me))
        .route("/force-logout", post(handlers::auth::force_logout))
        .route(
            "/force-logout-by-token",
            post(handlers::auth::force_logout_by_token),
        )
        .route(
            "/admin/users/{id}/force-logout",
            post(handlers::admin::force_logout_user),
        )
        .route_layer(axum_middleware::from_fn(activity::track_activity))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            session_guard::session_guard,
        ))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            authenticate::authenticate,
        ))
}
