//! Session lifecycle manager.
//!
//! Every flow here writes the single-session record the guard reads:
//! login replaces it, the logout flows clear it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use akademik_core::config::AuthConfig;
use akademik_core::error::AppError;
use akademik_core::result::AppResult;
use akademik_entity::User;

use crate::jwt::{JwtDecoder, JwtEncoder};
use crate::password::PasswordHasher;
use crate::store::IdentityStore;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// The bearer token now owning the account's session.
    pub token: String,
    /// Token expiration.
    pub expires_at: DateTime<Utc>,
    /// The authenticated user, with its new session state.
    pub user: User,
}

/// Manages the single-session lifecycle.
#[derive(Clone)]
pub struct SessionManager {
    /// User persistence.
    store: Arc<dyn IdentityStore>,
    /// JWT encoder for token generation.
    jwt_encoder: Arc<JwtEncoder>,
    /// JWT decoder for token validation.
    jwt_decoder: Arc<JwtDecoder>,
    /// Password hasher.
    password_hasher: Arc<PasswordHasher>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("jwt_encoder", &self.jwt_encoder)
            .field("jwt_decoder", &self.jwt_decoder)
            .finish()
    }
}

impl SessionManager {
    /// Creates a session manager over `store`.
    pub fn new(store: Arc<dyn IdentityStore>, auth_config: &AuthConfig) -> Self {
        Self {
            store,
            jwt_encoder: Arc::new(JwtEncoder::new(auth_config)),
            jwt_decoder: Arc::new(JwtDecoder::new(auth_config)),
            password_hasher: Arc::new(PasswordHasher::new()),
        }
    }

    /// Password hasher shared with user provisioning.
    pub fn password_hasher(&self) -> &PasswordHasher {
        &self.password_hasher
    }

    /// Performs the login flow:
    ///
    /// 1. Validate credentials
    /// 2. Issue a fresh bearer token
    /// 3. Record it as the only live session, replacing any previous one
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginResult> {
        let mut user = self.verify_credentials(username, password).await?;

        let issued = self.jwt_encoder.issue(&user)?;
        let replaced = user.is_logged_in();
        user.begin_session(issued.token.clone());
        self.store.save(&user).await?;

        if replaced {
            info!(
                user_id = %user.id,
                "Login replaced an existing session"
            );
        }
        info!(user_id = %user.id, username = %user.username, "Login successful");

        Ok(LoginResult {
            token: issued.token,
            expires_at: issued.expires_at,
            user,
        })
    }

    /// Resolves the identity a bearer token claims.
    ///
    /// Only the signature and expiry are checked here. Whether the token
    /// still owns the account's session is the guard's decision, so a
    /// superseded token still resolves to its user.
    pub async fn resolve_identity(&self, token: Option<&str>) -> AppResult<Option<User>> {
        let Some(token) = token else {
            return Ok(None);
        };

        let claims = match self.jwt_decoder.decode(token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e, "Bearer token rejected");
                return Ok(None);
            }
        };

        self.store.find_by_id(claims.user_id()).await
    }

    /// Ends the session of `user_id`.
    pub async fn logout(&self, user_id: Uuid) -> AppResult<()> {
        let user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        self.end_session(user).await?;
        info!(user_id = %user_id, "Logout completed");
        Ok(())
    }

    /// Ends a session from credentials alone, for a user locked out by a
    /// session on another device.
    pub async fn force_logout(&self, username: &str, password: &str) -> AppResult<User> {
        let user = self.verify_credentials(username, password).await?;
        let user = self.end_session(user).await?;
        info!(user_id = %user.id, "Force logout by credentials");
        Ok(user)
    }

    /// Ends the session of the user a token was issued to.
    ///
    /// The token must carry a valid signature; an expired token is accepted.
    pub async fn force_logout_by_token(&self, token: &str) -> AppResult<User> {
        let claims = self.jwt_decoder.decode_allow_expired(token)?;

        let user = self
            .store
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::authentication("Invalid token"))?;

        let user = self.end_session(user).await?;
        info!(user_id = %user.id, "Force logout by token");
        Ok(user)
    }

    /// Ends another user's session on behalf of an administrator.
    pub async fn admin_force_logout(&self, admin: &User, target_id: Uuid) -> AppResult<User> {
        if !admin.is_admin() {
            warn!(
                user_id = %admin.id,
                target_id = %target_id,
                "Non-admin attempted force logout"
            );
            return Err(AppError::authorization("Admin access required"));
        }

        let user = self
            .store
            .find_by_id(target_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {target_id} not found")))?;

        let user = self.end_session(user).await?;
        info!(
            admin_id = %admin.id,
            user_id = %user.id,
            "Admin force logout"
        );
        Ok(user)
    }

    async fn verify_credentials(&self, username: &str, password: &str) -> AppResult<User> {
        let user = self
            .store
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid username or password"))?;

        let valid = self
            .password_hasher
            .verify_password(password, &user.password_hash)?;

        if !valid {
            warn!(user_id = %user.id, "Invalid password");
            return Err(AppError::authentication("Invalid username or password"));
        }

        Ok(user)
    }

    /// Clears the session, writing only when there was one.
    async fn end_session(&self, mut user: User) -> AppResult<User> {
        if user.end_session() {
            self.store.revoke_session(user.id).await?;
        } else {
            debug!(user_id = %user.id, "Session already ended");
        }
        Ok(user)
    }
}
