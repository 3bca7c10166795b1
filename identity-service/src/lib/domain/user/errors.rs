use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for parsing stored enum values (role, auth provider)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseEnumError {
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Unknown auth provider: {0}")]
    UnknownAuthProvider(String),
}

/// Failures reported by a user store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("User store unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid user record: {0}")]
    InvalidRecord(String),
}

impl From<UsernameError> for StoreError {
    fn from(err: UsernameError) -> Self {
        StoreError::InvalidRecord(err.to_string())
    }
}

impl From<EmailError> for StoreError {
    fn from(err: EmailError) -> Self {
        StoreError::InvalidRecord(err.to_string())
    }
}

impl From<ParseEnumError> for StoreError {
    fn from(err: ParseEnumError) -> Self {
        StoreError::InvalidRecord(err.to_string())
    }
}
