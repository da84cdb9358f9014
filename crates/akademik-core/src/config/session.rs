//! Single-session enforcement configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Session guard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Path patterns that skip the session guard entirely.
    ///
    /// Patterns are matched against the request path without its leading
    /// slash; `*` matches any run of characters.
    #[serde(default = "default_bypass_paths")]
    pub bypass_paths: Vec<String>,
    /// Backend holding the user session records.
    #[serde(default)]
    pub identity_store: IdentityStoreKind,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            bypass_paths: default_bypass_paths(),
            identity_store: IdentityStoreKind::default(),
        }
    }
}

/// Which identity store implementation to wire at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityStoreKind {
    /// PostgreSQL `users` table.
    #[default]
    Postgres,
    /// Process-local map, for development and tests.
    Memory,
}

impl fmt::Display for IdentityStoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityStoreKind::Postgres => write!(f, "postgres"),
            IdentityStoreKind::Memory => write!(f, "memory"),
        }
    }
}

fn default_bypass_paths() -> Vec<String> {
    vec![
        "api/force-logout".to_string(),
        "api/force-logout-by-token".to_string(),
    ]
}
