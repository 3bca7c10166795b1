use std::fmt;

use thiserror::Error;

use super::claims::TokenType;

/// Error type for JWT operations.
///
/// Every parse failure is reported as a single `InvalidToken` kind. The
/// reason is kept for server-side logging and is not part of the message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is invalid")]
    InvalidToken(InvalidTokenReason),

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Signing secret must not be empty")]
    EmptySecret,
}

impl JwtError {
    /// Reason behind an `InvalidToken` failure, if any.
    pub fn reason(&self) -> Option<&InvalidTokenReason> {
        match self {
            JwtError::InvalidToken(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Why a token was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidTokenReason {
    Malformed(String),
    BadSignature,
    AlgorithmMismatch,
    Expired,
    WrongType { expected: TokenType, found: TokenType },
    MissingClaim(&'static str),
    RoleMismatch,
}

impl fmt::Display for InvalidTokenReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidTokenReason::Malformed(detail) => write!(f, "malformed token: {}", detail),
            InvalidTokenReason::BadSignature => f.write_str("signature verification failed"),
            InvalidTokenReason::AlgorithmMismatch => f.write_str("unexpected signing algorithm"),
            InvalidTokenReason::Expired => f.write_str("token expired"),
            InvalidTokenReason::WrongType { expected, found } => {
                write!(f, "expected {} token, found {}", expected, found)
            }
            InvalidTokenReason::MissingClaim(claim) => write!(f, "missing claim: {}", claim),
            InvalidTokenReason::RoleMismatch => {
                f.write_str("role claim does not match token type")
            }
        }
    }
}
