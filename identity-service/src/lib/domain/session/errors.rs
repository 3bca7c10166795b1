use thiserror::Error;

use crate::user::errors::StoreError;

/// Error for password policy violations at registration or password change.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Password too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Outcome kinds of authentication and authorization operations.
///
/// Messages are fixed per kind; they never say whether an email exists,
/// which credential was wrong, or why a token was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is disabled")]
    AccountDisabled,

    #[error("Email already in use")]
    DuplicateEmail,

    #[error("Username already in use")]
    DuplicateUsername,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Could not validate credentials")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    #[error("User not found")]
    UserNotFound,

    #[error("User store unavailable")]
    StoreUnavailable,

    /// Unrecoverable fault; the detail is for logs only.
    #[error("Internal error")]
    Internal(String),
}

impl AuthError {
    /// Whether the caller may retry the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AuthError::StoreUnavailable)
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail(_) => AuthError::DuplicateEmail,
            StoreError::DuplicateUsername(_) => AuthError::DuplicateUsername,
            StoreError::NotFound(_) => AuthError::UserNotFound,
            StoreError::Unavailable(detail) => {
                tracing::error!(error = %detail, "User store unavailable");
                AuthError::StoreUnavailable
            }
            StoreError::InvalidRecord(detail) => AuthError::Internal(detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_store_unavailable_is_retryable() {
        assert!(AuthError::StoreUnavailable.is_retryable());
        assert!(!AuthError::InvalidCredentials.is_retryable());
        assert!(!AuthError::InvalidToken.is_retryable());
        assert!(!AuthError::Internal("boom".to_string()).is_retryable());
    }

    #[test]
    fn test_store_error_mapping() {
        assert_eq!(
            AuthError::from(StoreError::DuplicateEmail("a@x.com".to_string())),
            AuthError::DuplicateEmail
        );
        assert_eq!(
            AuthError::from(StoreError::DuplicateUsername("alice".to_string())),
            AuthError::DuplicateUsername
        );
        assert_eq!(
            AuthError::from(StoreError::Unavailable("timeout".to_string())),
            AuthError::StoreUnavailable
        );
    }

    #[test]
    fn test_internal_message_hides_detail() {
        let err = AuthError::Internal("connection string leaked".to_string());
        assert_eq!(err.to_string(), "Internal error");
    }
}
