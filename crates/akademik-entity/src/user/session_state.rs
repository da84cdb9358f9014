//! Login state of a user account under the single-active-session policy.

use serde::{Deserialize, Serialize};

/// Whether an account currently has a live session, and which token owns it.
///
/// Persisted as the `is_logged_in` / `current_token` column pair. Folding
/// them into one enum rules out a logged-in account without a token.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    /// Exactly one session is live, owned by `token`.
    Active {
        /// The bearer token issued at the most recent login.
        token: String,
    },
    /// No live session.
    #[default]
    LoggedOut,
}

impl SessionState {
    /// Builds a state for a freshly issued token.
    pub fn active(token: impl Into<String>) -> Self {
        Self::Active {
            token: token.into(),
        }
    }

    /// Rebuilds the state from its two persisted columns.
    ///
    /// A row flagged logged in without a token loads as `LoggedOut`.
    pub fn from_columns(is_logged_in: bool, current_token: Option<String>) -> Self {
        match (is_logged_in, current_token) {
            (true, Some(token)) => Self::Active { token },
            _ => Self::LoggedOut,
        }
    }

    /// The `is_logged_in` column value.
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    /// The `current_token` column value.
    pub fn current_token(&self) -> Option<&str> {
        match self {
            Self::Active { token } => Some(token.as_str()),
            Self::LoggedOut => None,
        }
    }

    /// Whether `presented` is exactly the token on record.
    pub fn is_held_by(&self, presented: Option<&str>) -> bool {
        match (self, presented) {
            (Self::Active { token }, Some(presented)) => token == presented,
            _ => false,
        }
    }
}
