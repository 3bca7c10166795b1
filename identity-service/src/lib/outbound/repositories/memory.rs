use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserFilter;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::StoreError;

/// User store kept in process memory.
///
/// Enforces the same uniqueness rules as the Postgres schema: email and
/// username are unique, compared exactly.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_unique(
        users: &HashMap<UserId, User>,
        id: Option<UserId>,
        email: &str,
        username: &str,
    ) -> Result<(), StoreError> {
        let others = users.values().filter(|u| Some(u.id) != id);
        for other in others {
            if other.email.as_str() == email {
                return Err(StoreError::DuplicateEmail(email.to_string()));
            }
            if other.username.as_str() == username {
                return Err(StoreError::DuplicateUsername(username.to_string()));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        Self::check_unique(&users, None, user.email.as_str(), user.username.as_str())?;

        let now = Utc::now();
        let created = User {
            id: UserId::new(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            auth_provider: user.auth_provider,
            provider_user_id: None,
            profile_picture: None,
            role: user.role,
            is_active: user.is_active,
            is_verified: user.is_verified,
            created_at: now,
            updated_at: now,
        };
        users.insert(created.id, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| &u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn list(&self, filter: UserFilter) -> Result<Vec<User>, StoreError> {
        let mut users: Vec<User> = self
            .users
            .read()
            .await
            .values()
            .filter(|u| filter.matches(u))
            .cloned()
            .collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn update(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(StoreError::NotFound(user.id.to_string()));
        }
        Self::check_unique(
            &users,
            Some(user.id),
            user.email.as_str(),
            user.username.as_str(),
        )?;

        let mut updated = user;
        updated.updated_at = Utc::now();
        users.insert(updated.id, updated.clone());

        Ok(updated)
    }

    async fn update_password(
        &self,
        id: &UserId,
        password_hash: String,
    ) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        let user = users
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        user.password_hash = Some(password_hash);
        user.updated_at = Utc::now();

        Ok(user.clone())
    }
}
