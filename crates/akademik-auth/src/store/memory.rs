//! Process-local identity store backed by `dashmap`.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use akademik_core::error::AppError;
use akademik_core::result::AppResult;
use akademik_entity::User;

use super::IdentityStore;

/// In-memory identity store for development and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryIdentityStore {
    users: Arc<DashMap<Uuid, User>>,
    /// Lowercased username to user id; the entry lock makes the
    /// uniqueness check and the insert one step.
    usernames: Arc<DashMap<String, Uuid>>,
}

impl MemoryIdentityStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the store holds no users.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let id = match self.usernames.get(&username.to_lowercase()) {
            Some(entry) => *entry.value(),
            None => return Ok(None),
        };
        self.find_by_id(id).await
    }

    async fn insert(&self, user: &User) -> AppResult<()> {
        match self.usernames.entry(user.username.to_lowercase()) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Username '{}' is already taken",
                user.username
            ))),
            Entry::Vacant(slot) => {
                self.users.insert(user.id, user.clone());
                slot.insert(user.id);
                Ok(())
            }
        }
    }

    /// Usernames are not changed by `save`, as in the Postgres store.
    async fn save(&self, user: &User) -> AppResult<()> {
        match self.users.get_mut(&user.id) {
            Some(mut entry) => {
                let username = std::mem::take(&mut entry.username);
                *entry = User {
                    username,
                    ..user.clone()
                };
                Ok(())
            }
            None => Err(AppError::not_found(format!("User {} not found", user.id))),
        }
    }

    async fn revoke_session(&self, id: Uuid) -> AppResult<()> {
        match self.users.get_mut(&id) {
            Some(mut entry) => {
                entry.end_session();
                Ok(())
            }
            None => Err(AppError::not_found(format!("User {id} not found"))),
        }
    }
}
