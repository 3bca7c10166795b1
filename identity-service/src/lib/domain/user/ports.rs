use async_trait::async_trait;

use crate::domain::session::errors::AuthError;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserFilter;
use crate::domain::user::models::UserId;
use crate::user::errors::StoreError;
use crate::user::models::Username;

/// Port for user directory operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// List users on behalf of an authenticated caller.
    ///
    /// # Arguments
    /// * `caller` - Resolved identity of the requester
    /// * `filter` - Optional `is_active` constraint
    ///
    /// # Errors
    /// * `Forbidden` - Caller is not an admin
    /// * `StoreUnavailable` - User store failed
    async fn list_users(&self, caller: &User, filter: UserFilter) -> Result<Vec<User>, AuthError>;
}

/// Persistence operations for user aggregate.
///
/// Every method is a single point query or write; implementations must not
/// hold locks across calls.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Arguments
    /// * `user` - User fields to insert; id and timestamps are assigned by the store
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered
    /// * `DuplicateUsername` - Username is already taken
    /// * `Unavailable` - Store operation failed
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Unavailable` - Store operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError>;

    /// Retrieve user by username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Unavailable` - Store operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, StoreError>;

    /// Retrieve user by email address.
    ///
    /// # Arguments
    /// * `email` - Email address string, matched with the store's case policy
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Unavailable` - Store operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Retrieve users matching a filter.
    ///
    /// # Errors
    /// * `Unavailable` - Store operation failed
    async fn list(&self, filter: UserFilter) -> Result<Vec<User>, StoreError>;

    /// Update existing user in storage.
    ///
    /// # Arguments
    /// * `user` - User entity with updated fields
    ///
    /// # Returns
    /// Updated user entity
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DuplicateEmail` - New email is already registered
    /// * `DuplicateUsername` - New username is already taken
    /// * `Unavailable` - Store operation failed
    async fn update(&self, user: User) -> Result<User, StoreError>;

    /// Replace only the stored password hash of a user.
    ///
    /// Every other column keeps its current store-side value.
    ///
    /// # Returns
    /// Updated user entity
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Unavailable` - Store operation failed
    async fn update_password(&self, id: &UserId, password_hash: String)
        -> Result<User, StoreError>;
}
