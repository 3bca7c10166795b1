use std::fmt;

use chrono::Duration;

use crate::domain::session::errors::PasswordPolicyError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Username;

/// Plaintext password accepted for registration or as a new password.
///
/// Never printed: `Debug` is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;
    const MAX_LENGTH: usize = 100;

    /// Validate a new password against the length policy.
    ///
    /// The byte limit of the hasher applies on top of the character limit.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 8 characters
    /// * `TooLong` - More than 100 characters or above the hasher's byte limit
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH || password.len() > auth::MAX_PASSWORD_BYTES {
            Err(PasswordPolicyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(password))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Login input. Transient, never stored.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Command to register a new local account with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: Password,
}

impl RegisterCommand {
    pub fn new(username: Username, email: EmailAddress, password: Password) -> Self {
        Self {
            username,
            email,
            password,
        }
    }
}

/// Access and refresh token, always issued together.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
}

impl TokenPair {
    pub const BEARER: &'static str = "bearer";

    pub fn bearer(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: Self::BEARER,
        }
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"***")
            .field("refresh_token", &"***")
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// Time-to-live of each token type. The two values are independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    pub access: Duration,
    pub refresh: Duration,
}

impl TokenLifetimes {
    /// Longest accepted access token lifetime.
    pub const MAX_ACCESS_MINUTES: i64 = 60 * 24;
    /// Longest accepted refresh token lifetime.
    pub const MAX_REFRESH_DAYS: i64 = 365;

    /// Build lifetimes from configured units.
    ///
    /// Returns `None` when either value is not positive or above its maximum.
    pub fn new(access_minutes: i64, refresh_days: i64) -> Option<Self> {
        if !(1..=Self::MAX_ACCESS_MINUTES).contains(&access_minutes)
            || !(1..=Self::MAX_REFRESH_DAYS).contains(&refresh_days)
        {
            return None;
        }

        Some(Self {
            access: Duration::try_minutes(access_minutes)?,
            refresh: Duration::try_days(refresh_days)?,
        })
    }
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            access: Duration::minutes(30),
            refresh: Duration::days(7),
        }
    }
}

/// Acknowledgement of a stateless operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgement {
    pub message: String,
}

impl Acknowledgement {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_policy() {
        assert!(Password::new("longenough1".to_string()).is_ok());
        assert_eq!(
            Password::new("short".to_string()),
            Err(PasswordPolicyError::TooShort { min: 8, actual: 5 })
        );
        assert!(matches!(
            Password::new("p".repeat(101)),
            Err(PasswordPolicyError::TooLong { .. })
        ));
    }

    #[test]
    fn test_secrets_are_redacted_in_debug() {
        let password = Password::new("longenough1".to_string()).unwrap();
        assert!(!format!("{:?}", password).contains("longenough1"));

        let credentials = Credentials::new("a@x.com", "longenough1");
        let rendered = format!("{:?}", credentials);
        assert!(rendered.contains("a@x.com"));
        assert!(!rendered.contains("longenough1"));

        let pair = TokenPair::bearer("access.jwt".to_string(), "refresh.jwt".to_string());
        assert!(!format!("{:?}", pair).contains("jwt"));
    }

    #[test]
    fn test_default_lifetimes() {
        let lifetimes = TokenLifetimes::default();
        assert_eq!(lifetimes.access, Duration::minutes(30));
        assert_eq!(lifetimes.refresh, Duration::days(7));
        assert_eq!(TokenLifetimes::new(30, 7), Some(lifetimes));
    }

    #[test]
    fn test_lifetimes_out_of_range() {
        assert!(TokenLifetimes::new(0, 7).is_none());
        assert!(TokenLifetimes::new(30, -1).is_none());
        assert!(TokenLifetimes::new(30, 1_000_000_000).is_none());
        assert!(TokenLifetimes::new(i64::MAX, 7).is_none());
        assert!(TokenLifetimes::new(
            TokenLifetimes::MAX_ACCESS_MINUTES,
            TokenLifetimes::MAX_REFRESH_DAYS
        )
        .is_some());
    }
}
