//! `IdentityStore` over the Postgres user repository.

use async_trait::async_trait;
use uuid::Uuid;

use akademik_core::result::AppResult;
use akademik_database::repositories::user::UserRepository;
use akademik_entity::User;

use super::IdentityStore;

#[async_trait]
impl IdentityStore for UserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        UserRepository::find_by_id(self, id).await
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        UserRepository::find_by_username(self, username).await
    }

    async fn insert(&self, user: &User) -> AppResult<()> {
        self.create(user).await
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        self.update(user).await
    }

    async fn revoke_session(&self, id: Uuid) -> AppResult<()> {
        self.clear_session(id).await
    }
}
