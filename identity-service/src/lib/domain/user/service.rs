use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::session::errors::AuthError;
use crate::domain::session::guard::role_permits;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserFilter;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user directory operations.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    pub fn new(repository: Arc<UR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn list_users(&self, caller: &User, filter: UserFilter) -> Result<Vec<User>, AuthError> {
        if !role_permits(caller.role, &[Role::Admin]) {
            tracing::info!(user_id = %caller.id, role = %caller.role, "User listing refused");
            return Err(AuthError::Forbidden);
        }

        Ok(self.repository.list(filter).await?)
    }
}
