//! User entity model.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::role::UserRole;
use super::session_state::SessionState;

/// A registered user (student, lecturer or administrator).
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name (NIM / NIP or admin handle).
    pub username: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Argon2 password hash.
    pub password_hash: String,
    /// Human-readable display name.
    pub display_name: Option<String>,
    /// User role.
    pub role: UserRole,
    /// Single-session login state.
    pub session: SessionState,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Build a logged-out user from creation data.
    pub fn new(data: NewUser) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: data.username,
            email: data.email,
            password_hash: data.password_hash,
            display_name: data.display_name,
            role: data.role,
            session: SessionState::LoggedOut,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Whether the account has a live session.
    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    /// The token owning the live session, if any.
    pub fn current_token(&self) -> Option<&str> {
        self.session.current_token()
    }

    /// Record a successful login, replacing any previous session.
    pub fn begin_session(&mut self, token: impl Into<String>) {
        let now = Utc::now();
        self.session = SessionState::active(token);
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    /// Clear the live session. Returns `false` if it was already clear.
    pub fn end_session(&mut self) -> bool {
        if !self.session.is_logged_in() {
            return false;
        }
        self.session = SessionState::LoggedOut;
        self.updated_at = Utc::now();
        true
    }

    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Desired username.
    pub username: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Display name (optional).
    pub display_name: Option<String>,
    /// Assigned role.
    pub role: UserRole,
}
