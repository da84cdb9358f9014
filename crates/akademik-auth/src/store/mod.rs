//! Persistence of user session records.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use akademik_core::result::AppResult;
use akademik_entity::User;

pub use memory::MemoryIdentityStore;

/// Storage for the user records the guard reads and revokes.
#[async_trait]
pub trait IdentityStore: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by login name (case-insensitive).
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Persist a new user.
    async fn insert(&self, user: &User) -> AppResult<()>;

    /// Persist the mutable fields of an existing user, including its
    /// session state.
    async fn save(&self, user: &User) -> AppResult<()>;

    /// Set the user's session to logged out, touching nothing else.
    ///
    /// Idempotent: revoking an already logged-out user succeeds.
    async fn revoke_session(&self, id: Uuid) -> AppResult<()>;
}
