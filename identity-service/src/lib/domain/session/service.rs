use std::sync::Arc;

use async_trait::async_trait;
use auth::Claims;
use auth::PasswordError;
use auth::PasswordHasher;
use auth::TokenCodec;
use auth::TokenType;

use crate::domain::session::authenticator::CredentialAuthenticator;
use crate::domain::session::errors::AuthError;
use crate::domain::session::models::Acknowledgement;
use crate::domain::session::models::Credentials;
use crate::domain::session::models::Password;
use crate::domain::session::models::RegisterCommand;
use crate::domain::session::models::TokenLifetimes;
use crate::domain::session::models::TokenPair;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::ports::UserRepository;

/// Domain service issuing and rotating session token pairs.
///
/// Concrete implementation of SessionServicePort with dependency injection.
pub struct SessionService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: CredentialAuthenticator<UR>,
    codec: Arc<TokenCodec>,
    lifetimes: TokenLifetimes,
    password_hasher: PasswordHasher,
}

impl<UR> SessionService<UR>
where
    UR: UserRepository,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `codec` - Process-wide token codec
    /// * `lifetimes` - Access and refresh token TTLs
    ///
    /// # Errors
    /// * `HashingFailed` - The credential authenticator could not be prepared
    pub fn new(
        repository: Arc<UR>,
        codec: Arc<TokenCodec>,
        lifetimes: TokenLifetimes,
    ) -> Result<Self, PasswordError> {
        Ok(Self {
            authenticator: CredentialAuthenticator::new(Arc::clone(&repository))?,
            repository,
            codec,
            lifetimes,
            password_hasher: PasswordHasher::new(),
        })
    }

    fn issue_pair(&self, user: &User) -> Result<TokenPair, AuthError> {
        let access = Claims::access(user.id, user.email.as_str(), user.role.as_str());
        let refresh = Claims::refresh(user.id, user.email.as_str());

        let access_token = self
            .codec
            .issue(&access, self.lifetimes.access)
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        let refresh_token = self
            .codec
            .issue(&refresh, self.lifetimes.refresh)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(TokenPair::bearer(access_token, refresh_token))
    }
}

#[async_trait]
impl<UR> SessionServicePort for SessionService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<TokenPair, AuthError> {
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(AuthError::DuplicateEmail);
        }

        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(AuthError::DuplicateUsername);
        }

        let password_hash = self
            .password_hasher
            .hash(command.password.as_str())
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))?;

        // The store's unique constraints still decide races between concurrent registrations
        let user = self
            .repository
            .create(NewUser::local(command.username, command.email, password_hash))
            .await?;

        tracing::info!(user_id = %user.id, "User registered");

        self.issue_pair(&user)
    }

    async fn login(&self, credentials: Credentials) -> Result<TokenPair, AuthError> {
        let user = self
            .authenticator
            .authenticate(&credentials.email, &credentials.password)
            .await?
            .ok_or_else(|| {
                tracing::info!("Login rejected");
                AuthError::InvalidCredentials
            })?;

        if !user.is_active {
            tracing::info!(user_id = %user.id, "Login refused for disabled account");
            return Err(AuthError::AccountDisabled);
        }

        tracing::info!(user_id = %user.id, "User logged in");

        self.issue_pair(&user)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let claims = self
            .codec
            .parse(refresh_token, TokenType::Refresh)
            .map_err(|e| {
                if let Some(reason) = e.reason() {
                    tracing::debug!(reason = %reason, "Refresh token rejected");
                }
                AuthError::InvalidToken
            })?;

        let user_id = UserId::from_string(&claims.sub).map_err(|_| AuthError::InvalidToken)?;

        let user = self
            .repository
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.is_active {
            return Err(AuthError::AccountDisabled);
        }

        tracing::debug!(user_id = %user.id, "Token pair rotated");

        self.issue_pair(&user)
    }

    async fn logout(&self, user: &User) -> Acknowledgement {
        // Nothing to destroy server-side; the client drops its tokens
        tracing::info!(user_id = %user.id, "User logged out");
        Acknowledgement::new("You have been logged out")
    }

    async fn change_password(
        &self,
        user: &User,
        current_password: &str,
        new_password: Password,
    ) -> Result<Acknowledgement, AuthError> {
        if !user.is_active {
            return Err(AuthError::Forbidden);
        }

        let current_hash = user
            .password_hash
            .as_deref()
            .ok_or(AuthError::InvalidCredentials)?;

        let matches = self
            .password_hasher
            .verify(current_password, current_hash)
            .unwrap_or(false);
        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        let password_hash = self
            .password_hasher
            .hash(new_password.as_str())
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))?;

        // Only the hash is written; role and active flag stay as the store has them
        self.repository
            .update_password(&user.id, password_hash)
            .await?;

        tracing::info!(user_id = %user.id, "Password changed");

        Ok(Acknowledgement::new("Password changed successfully"))
    }
}
