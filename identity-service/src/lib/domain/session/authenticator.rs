use std::sync::Arc;

use auth::PasswordError;
use auth::PasswordHasher;
use uuid::Uuid;

use crate::domain::session::errors::AuthError;
use crate::domain::user::models::User;
use crate::user::ports::UserRepository;

/// Validates a plaintext password against the stored hash of a user.
///
/// Unknown email, missing local password and wrong password all come back as
/// `Ok(None)`, and each path runs exactly one Argon2 verification.
pub struct CredentialAuthenticator<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: PasswordHasher,
    // Verified against when there is no stored hash to compare with
    dummy_hash: String,
}

impl<UR> CredentialAuthenticator<UR>
where
    UR: UserRepository,
{
    /// Create a new authenticator backed by `repository`.
    ///
    /// # Errors
    /// * `HashingFailed` - The placeholder hash could not be computed
    pub fn new(repository: Arc<UR>) -> Result<Self, PasswordError> {
        let password_hasher = PasswordHasher::new();
        let dummy_hash = password_hasher.hash(&Uuid::new_v4().to_string())?;

        Ok(Self {
            repository,
            password_hasher,
            dummy_hash,
        })
    }

    /// Look up a user by email and check the password.
    ///
    /// # Returns
    /// The matching user, or `None` when there is no match
    ///
    /// # Errors
    /// * `StoreUnavailable` - User store failed
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, AuthError> {
        let user = self.repository.find_by_email(email).await?;

        let Some(user) = user else {
            self.spend_verification(password);
            return Ok(None);
        };

        let Some(hash) = user.password_hash.as_deref() else {
            self.spend_verification(password);
            return Ok(None);
        };

        match self.password_hasher.verify(password, hash) {
            Ok(true) => Ok(Some(user)),
            Ok(false) => Ok(None),
            Err(e) => {
                tracing::warn!(user_id = %user.id, error = %e, "Password verification failed");
                Ok(None)
            }
        }
    }

    fn spend_verification(&self, password: &str) {
        let _ = self.password_hasher.verify(password, &self.dummy_hash);
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::test_support::MockTestUserRepository;
    use crate::domain::user::models::AuthProvider;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Role;
    use crate::domain::user::models::UserId;
    use crate::domain::user::models::Username;
    use crate::user::errors::StoreError;

    fn user_with_hash(password_hash: Option<String>) -> User {
        User {
            id: UserId::new(),
            username: Username::new("alice".to_string()).unwrap(),
            email: EmailAddress::new("a@x.com".to_string()).unwrap(),
            password_hash,
            auth_provider: AuthProvider::Local,
            provider_user_id: None,
            profile_picture: None,
            role: Role::User,
            is_active: true,
            is_verified: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let hash = PasswordHasher::new().hash("longenough1").unwrap();
        let user = user_with_hash(Some(hash));
        let expected_id = user.id;

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .withf(|email| email == "a@x.com")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let authenticator = CredentialAuthenticator::new(Arc::new(repository)).unwrap();

        let result = authenticator.authenticate("a@x.com", "longenough1").await;
        assert_eq!(result.unwrap().map(|u| u.id), Some(expected_id));
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let hash = PasswordHasher::new().hash("longenough1").unwrap();
        let user = user_with_hash(Some(hash));

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let authenticator = CredentialAuthenticator::new(Arc::new(repository)).unwrap();

        let result = authenticator.authenticate("a@x.com", "wrong_password").await;
        assert_eq!(result, Ok(None));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let authenticator = CredentialAuthenticator::new(Arc::new(repository)).unwrap();

        let result = authenticator.authenticate("nobody@x.com", "longenough1").await;
        assert_eq!(result, Ok(None));
    }

    #[tokio::test]
    async fn test_authenticate_federated_account_without_password() {
        let mut user = user_with_hash(None);
        user.auth_provider = AuthProvider::Google;

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let authenticator = CredentialAuthenticator::new(Arc::new(repository)).unwrap();

        let result = authenticator.authenticate("a@x.com", "longenough1").await;
        assert_eq!(result, Ok(None));
    }

    #[tokio::test]
    async fn test_authenticate_corrupt_hash_is_no_match() {
        let user = user_with_hash(Some("not-a-phc-string".to_string()));

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let authenticator = CredentialAuthenticator::new(Arc::new(repository)).unwrap();

        let result = authenticator.authenticate("a@x.com", "longenough1").await;
        assert_eq!(result, Ok(None));
    }

    #[tokio::test]
    async fn test_authenticate_store_unavailable() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("pool timed out".to_string())));

        let authenticator = CredentialAuthenticator::new(Arc::new(repository)).unwrap();

        let result = authenticator.authenticate("a@x.com", "longenough1").await;
        assert_eq!(result, Err(AuthError::StoreUnavailable));
    }
}
