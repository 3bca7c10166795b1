//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for services:
//! - Password hashing (Argon2id)
//! - Typed session tokens (JWT, HMAC-SHA) with access/refresh discrimination
//!
//! Services own their user model and decide what goes into a token; this
//! crate only guarantees how passwords and tokens are handled.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{Algorithm, Claims, TokenCodec, TokenType};
//! use chrono::Duration;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!", Algorithm::HS256).unwrap();
//!
//! let access = codec
//!     .issue(&Claims::access("user123", "alice@example.com", "user"), Duration::minutes(30))
//!     .unwrap();
//! let claims = codec.parse(&access, TokenType::Access).unwrap();
//! assert_eq!(claims.sub, "user123");
//!
//! // A refresh token is never accepted where an access token is expected
//! let refresh = codec
//!     .issue(&Claims::refresh("user123", "alice@example.com"), Duration::days(7))
//!     .unwrap();
//! assert!(codec.parse(&refresh, TokenType::Access).is_err());
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jsonwebtoken::Algorithm;
pub use jwt::Claims;
pub use jwt::InvalidTokenReason;
pub use jwt::JwtError;
pub use jwt::TokenCodec;
pub use jwt::TokenType;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::MAX_PASSWORD_BYTES;
