use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::TokenType;
use super::errors::InvalidTokenReason;
use super::errors::JwtError;

/// Signs and parses session tokens.
///
/// Holds a single secret and a single HMAC algorithm for the whole process.
/// Tokens whose header names any other algorithm are rejected.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
}

impl TokenCodec {
    /// Create a new codec with a secret key and an HMAC algorithm.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    /// * `algorithm` - One of HS256, HS384, HS512
    ///
    /// # Errors
    /// * `EmptySecret` - Secret is empty
    /// * `UnsupportedAlgorithm` - Algorithm is not in the HMAC-SHA family
    ///
    /// # Security Notes
    /// - The secret should be at least as long as the digest (32 bytes for HS256)
    /// - Rotating the secret invalidates every outstanding token
    pub fn new(secret: &[u8], algorithm: Algorithm) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::EmptySecret);
        }
        if !is_hmac(algorithm) {
            return Err(JwtError::UnsupportedAlgorithm(format!("{:?}", algorithm)));
        }

        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            validation,
        })
    }

    /// Algorithm this codec signs with and accepts.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Sign claims into a token that expires after `ttl`.
    ///
    /// `iat` and `exp` of the supplied claims are overwritten.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims are inconsistent or signing failed
    pub fn issue(&self, claims: &Claims, ttl: Duration) -> Result<String, JwtError> {
        claims
            .check(claims.token_type)
            .map_err(|reason| JwtError::EncodingFailed(reason.to_string()))?;

        let now = Utc::now();
        let expires_at = now.checked_add_signed(ttl).ok_or_else(|| {
            JwtError::EncodingFailed(format!("ttl of {} seconds is out of range", ttl.num_seconds()))
        })?;

        let mut stamped = claims.clone();
        stamped.iat = now.timestamp();
        stamped.exp = expires_at.timestamp();

        let header = Header::new(self.algorithm);

        encode(&header, &stamped, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Parse and validate a token of the expected type.
    ///
    /// # Errors
    /// * `InvalidToken` - Bad signature, malformed, other algorithm, wrong type,
    ///   missing claims or expired
    pub fn parse(&self, token: &str, expected: TokenType) -> Result<Claims, JwtError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                let reason = match e.kind() {
                    ErrorKind::ExpiredSignature => InvalidTokenReason::Expired,
                    ErrorKind::InvalidSignature => InvalidTokenReason::BadSignature,
                    ErrorKind::InvalidAlgorithm => InvalidTokenReason::AlgorithmMismatch,
                    _ => InvalidTokenReason::Malformed(e.to_string()),
                };
                JwtError::InvalidToken(reason)
            })?;

        let claims = token_data.claims;
        claims.check(expected).map_err(JwtError::InvalidToken)?;

        // jsonwebtoken compares with `exp < now - leeway`; keep our own check too
        if claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::InvalidToken(InvalidTokenReason::Expired));
        }

        Ok(claims)
    }
}

fn is_hmac(algorithm: Algorithm) -> bool {
    matches!(
        algorithm,
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
    )
}
