//! Axum middleware stack.

pub mod activity;
pub mod authenticate;
pub mod cors;
pub mod logging;
pub mod session_guard;
