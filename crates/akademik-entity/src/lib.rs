//! # akademik-entity
//!
//! Domain entities shared by the persistence, auth and API layers.

pub mod user;

pub use user::{SessionState, User, UserRole};
