//! # akademik-api
//!
//! HTTP API layer for Akademik built on Axum.
//!
//! Provides the auth endpoints, the authentication and session-guard
//! middleware, CORS and request logging, extractors, DTOs and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state};
pub use error::ApiError;
pub use state::AppState;
