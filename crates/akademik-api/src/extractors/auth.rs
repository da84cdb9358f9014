//! `AuthUser` extractor: the identity the session guard let through.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use akademik_auth::guard::{GuardRejection, RequestIdentity};
use akademik_entity::User;

/// Authenticated user available in guarded handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    /// Returns the inner `User`.
    pub fn user(&self) -> &User {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = User;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = GuardRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestIdentity>()
            .cloned()
            .and_then(RequestIdentity::into_user)
            .map(AuthUser)
            .ok_or(GuardRejection::Unauthenticated)
    }
}
