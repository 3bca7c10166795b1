use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use super::errors::InvalidTokenReason;

/// Discriminates what a token may be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived token presented as `Authorization: Bearer`.
    Access,
    /// Long-lived token exchanged for a new token pair.
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session token claims.
///
/// Access tokens always carry a `role`, refresh tokens never do, so a refresh
/// token can not stand in as authorization evidence.
/// `exp` and `iat` are stamped by the codec at issuance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    #[serde(default)]
    pub sub: String,

    /// Email of the subject at issuance time
    #[serde(default)]
    pub email: String,

    /// Role of the subject, access tokens only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Token type tag
    #[serde(rename = "type")]
    pub token_type: TokenType,

    /// Expiration time (Unix timestamp)
    #[serde(default)]
    pub exp: i64,

    /// Issued at (Unix timestamp)
    #[serde(default)]
    pub iat: i64,
}

impl Claims {
    /// Create claims for an access token.
    ///
    /// # Arguments
    /// * `sub` - Unique user identifier
    /// * `email` - User email
    /// * `role` - User role name
    pub fn access(sub: impl ToString, email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            sub: sub.to_string(),
            email: email.into(),
            role: Some(role.into()),
            token_type: TokenType::Access,
            exp: 0,
            iat: 0,
        }
    }

    /// Create claims for a refresh token.
    ///
    /// # Arguments
    /// * `sub` - Unique user identifier
    /// * `email` - User email
    pub fn refresh(sub: impl ToString, email: impl Into<String>) -> Self {
        Self {
            sub: sub.to_string(),
            email: email.into(),
            role: None,
            token_type: TokenType::Refresh,
            exp: 0,
            iat: 0,
        }
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }

    /// Check the claims are complete and consistent with `expected`.
    pub(crate) fn check(&self, expected: TokenType) -> Result<(), InvalidTokenReason> {
        if self.token_type != expected {
            return Err(InvalidTokenReason::WrongType {
                expected,
                found: self.token_type,
            });
        }
        if self.sub.is_empty() {
            return Err(InvalidTokenReason::MissingClaim("sub"));
        }
        if self.email.is_empty() {
            return Err(InvalidTokenReason::MissingClaim("email"));
        }

        match (self.token_type, self.role.as_deref()) {
            (TokenType::Access, Some(role)) if !role.is_empty() => Ok(()),
            (TokenType::Refresh, None) => Ok(()),
            _ => Err(InvalidTokenReason::RoleMismatch),
        }
    }
}
