//! The session guard itself.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use akademik_core::config::SessionConfig;
use akademik_core::error::AppError;
use akademik_core::result::AppResult;

use crate::store::IdentityStore;

use super::rejection::{GuardOutcome, GuardRejection};
use super::request::RequestInspector;
use super::resolver::AuthenticationResolver;

/// Enforces "last login wins" on every authenticated request.
#[derive(Clone)]
pub struct SessionGuard {
    /// Where revoked session state is written.
    store: Arc<dyn IdentityStore>,
    /// Path patterns exempt from the guard.
    bypass_paths: Vec<String>,
}

impl std::fmt::Debug for SessionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGuard")
            .field("bypass_paths", &self.bypass_paths)
            .finish()
    }
}

impl SessionGuard {
    /// Creates a guard exempting `bypass_paths`.
    pub fn new(store: Arc<dyn IdentityStore>, bypass_paths: Vec<String>) -> Self {
        Self {
            store,
            bypass_paths,
        }
    }

    /// Creates a guard from session configuration.
    pub fn from_config(store: Arc<dyn IdentityStore>, config: &SessionConfig) -> Self {
        Self::new(store, config.bypass_paths.clone())
    }

    /// Whether the request targets a path exempt from the guard.
    pub fn is_bypassed<R>(&self, request: &R) -> bool
    where
        R: RequestInspector + ?Sized,
    {
        self.bypass_paths
            .iter()
            .any(|pattern| request.matches_path(pattern))
    }

    /// Decides whether `request` may proceed.
    ///
    /// 1. Force-logout paths always pass.
    /// 2. No identity: `Unauthenticated`.
    /// 3. Identity logged out: drop it, `SessionExpired`.
    /// 4. Token differs from the one on record: log the account out,
    ///    persist, drop the identity, `DeviceConflict`.
    /// 5. Otherwise pass.
    ///
    /// Returns `Err` only when the step 4 write fails. The identity is
    /// dropped in that case too and the request must not proceed.
    pub async fn authorize<R, A>(&self, request: &R, auth: &mut A) -> AppResult<GuardOutcome>
    where
        R: RequestInspector + Sync + ?Sized,
        A: AuthenticationResolver + Send + ?Sized,
    {
        if self.is_bypassed(request) {
            debug!(path = %request.path(), "Session guard bypassed");
            return Ok(GuardOutcome::Allow);
        }

        let Some(identity) = auth.current_identity() else {
            debug!(path = %request.path(), "No authenticated identity");
            return Ok(GuardOutcome::Reject(GuardRejection::Unauthenticated));
        };

        if !identity.is_logged_in() {
            info!(
                user_id = %identity.id,
                path = %request.path(),
                "Session already ended, rejecting request"
            );
            auth.drop_association();
            return Ok(GuardOutcome::Reject(GuardRejection::SessionExpired));
        }

        if identity.session.is_held_by(request.bearer_token()) {
            return Ok(GuardOutcome::Allow);
        }

        let user_id = identity.id;

        if let Err(e) = self.store.revoke_session(user_id).await {
            error!(
                user_id = %user_id,
                error = %e,
                "Failed to persist session revocation"
            );
            auth.drop_association();
            return Err(AppError::service_unavailable(
                "Unable to verify session at this time",
            ));
        }

        warn!(
            user_id = %user_id,
            path = %request.path(),
            "Token does not match current session, account logged out"
        );
        auth.drop_association();
        Ok(GuardOutcome::Reject(GuardRejection::DeviceConflict))
    }
}
