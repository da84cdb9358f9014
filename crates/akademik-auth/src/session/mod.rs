//! Session lifecycle: login, logout and the force-logout flows.

pub mod manager;

pub use manager::{LoginResult, SessionManager};
