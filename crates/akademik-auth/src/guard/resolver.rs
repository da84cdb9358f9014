//! The identity an upstream authentication layer attached to a request.

use akademik_entity::User;

/// Per-request view of the authenticated identity.
pub trait AuthenticationResolver {
    /// The resolved user, if the caller authenticated.
    fn current_identity(&self) -> Option<&User>;

    /// Forget the identity for the rest of this request.
    fn drop_association(&mut self);
}

/// Identity slot carried in request extensions between the authentication
/// middleware, the session guard and the handlers.
#[derive(Debug, Clone, Default)]
pub struct RequestIdentity {
    user: Option<User>,
}

impl RequestIdentity {
    /// Creates a slot holding `user`.
    pub fn new(user: Option<User>) -> Self {
        Self { user }
    }

    /// Creates a slot for an authenticated user.
    pub fn authenticated(user: User) -> Self {
        Self { user: Some(user) }
    }

    /// Consumes the slot, returning the user if still associated.
    pub fn into_user(self) -> Option<User> {
        self.user
    }
}

impl AuthenticationResolver for RequestIdentity {
    fn current_identity(&self) -> Option<&User> {
        self.user.as_ref()
    }

    fn drop_association(&mut self) {
        self.user = None;
    }
}
