//! # akademik-database
//!
//! PostgreSQL connection management, migrations and the user repository.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
