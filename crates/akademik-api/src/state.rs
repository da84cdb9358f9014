//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use akademik_auth::guard::SessionGuard;
use akademik_auth::session::SessionManager;
use akademik_core::config::AppConfig;
use akademik_database::DatabasePool;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL pool, absent when running on the in-memory store
    pub database: Option<DatabasePool>,
    /// Login, logout and force-logout flows
    pub session_manager: Arc<SessionManager>,
    /// Single-active-session guard
    pub session_guard: Arc<SessionGuard>,
}
