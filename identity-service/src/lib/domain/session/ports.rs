use async_trait::async_trait;

use crate::domain::session::errors::AuthError;
use crate::domain::session::models::Acknowledgement;
use crate::domain::session::models::Credentials;
use crate::domain::session::models::Password;
use crate::domain::session::models::RegisterCommand;
use crate::domain::session::models::TokenPair;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;

/// Port for session lifecycle operations.
///
/// Sessions are stateless: the server keeps no record of issued tokens.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Register a new local account and log it in.
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered
    /// * `DuplicateUsername` - Username is already taken
    /// * `StoreUnavailable` - User store failed
    async fn register(&self, command: RegisterCommand) -> Result<TokenPair, AuthError>;

    /// Exchange credentials for a token pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email, no local password, or wrong password
    /// * `AccountDisabled` - Correct credentials for an inactive account
    /// * `StoreUnavailable` - User store failed
    async fn login(&self, credentials: Credentials) -> Result<TokenPair, AuthError>;

    /// Exchange a refresh token for a brand-new token pair.
    ///
    /// The presented token stays valid until its own expiry.
    ///
    /// # Errors
    /// * `InvalidToken` - Token failed to parse as a refresh token
    /// * `UserNotFound` - Subject no longer exists
    /// * `AccountDisabled` - Subject is inactive
    /// * `StoreUnavailable` - User store failed
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError>;

    /// Acknowledge a logout. Outstanding tokens are not invalidated.
    async fn logout(&self, user: &User) -> Acknowledgement;

    /// Replace the local password of an authenticated user.
    ///
    /// # Errors
    /// * `Forbidden` - Account is inactive
    /// * `InvalidCredentials` - Current password does not verify
    /// * `StoreUnavailable` - User store failed
    async fn change_password(
        &self,
        user: &User,
        current_password: &str,
        new_password: Password,
    ) -> Result<Acknowledgement, AuthError>;
}

/// Port for resolving and authorizing callers.
#[async_trait]
pub trait AccessGuardPort: Send + Sync + 'static {
    /// Resolve the caller behind an access token.
    ///
    /// # Errors
    /// * `Unauthorized` - Token invalid or subject unknown
    /// * `Forbidden` - Subject is inactive
    /// * `StoreUnavailable` - User store failed
    async fn resolve_identity(&self, bearer_token: &str) -> Result<User, AuthError>;

    /// Check the user's store-side role is one of `allowed`.
    ///
    /// # Errors
    /// * `Forbidden` - Role is not in the allowed set
    fn require_role(&self, user: &User, allowed: &[Role]) -> Result<(), AuthError>;
}
