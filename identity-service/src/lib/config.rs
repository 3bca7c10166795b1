use std::env;
use std::fmt;

use auth::Algorithm;
use auth::JwtError;
use auth::TokenCodec;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::domain::session::models::TokenLifetimes;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_access_token_expire_minutes")]
    pub access_token_expire_minutes: i64,
    #[serde(default = "default_refresh_token_expire_days")]
    pub refresh_token_expire_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_access_token_expire_minutes() -> i64 {
    30
}

fn default_refresh_token_expire_days() -> i64 {
    7
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
                "http://localhost:8080".to_string(),
            ],
        }
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("algorithm", &self.algorithm)
            .field(
                "access_token_expire_minutes",
                &self.access_token_expire_minutes,
            )
            .field("refresh_token_expire_days", &self.refresh_token_expire_days)
            .finish()
    }
}

impl JwtConfig {
    pub fn algorithm(&self) -> Result<Algorithm, JwtError> {
        self.algorithm
            .parse::<Algorithm>()
            .map_err(|_| JwtError::UnsupportedAlgorithm(self.algorithm.clone()))
    }

    /// Build the token codec for this key and algorithm.
    pub fn codec(&self) -> Result<TokenCodec, JwtError> {
        TokenCodec::new(self.secret.as_bytes(), self.algorithm()?)
    }

    /// Token lifetimes, bounded by `TokenLifetimes::MAX_*`.
    pub fn lifetimes(&self) -> Result<TokenLifetimes, ConfigError> {
        TokenLifetimes::new(
            self.access_token_expire_minutes,
            self.refresh_token_expire_days,
        )
        .ok_or_else(|| {
            ConfigError::Message(format!(
                "jwt token lifetimes must be between 1 and {} minutes (access) and 1 and {} days (refresh)",
                TokenLifetimes::MAX_ACCESS_MINUTES,
                TokenLifetimes::MAX_REFRESH_DAYS
            ))
        })
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the server cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message("jwt.secret must be set".to_string()));
        }
        self.jwt.lifetimes()?;
        self.jwt
            .codec()
            .map(|_| ())
            .map_err(|e| ConfigError::Message(format!("jwt: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str, algorithm: &str) -> Config {
        Config {
            database: DatabaseConfig {
                url: "postgresql://localhost/identity".to_string(),
            },
            server: ServerConfig { http_port: 8000 },
            jwt: JwtConfig {
                secret: secret.to_string(),
                algorithm: algorithm.to_string(),
                access_token_expire_minutes: 30,
                refresh_token_expire_days: 7,
            },
            cors: CorsConfig::default(),
        }
    }

    #[test]
    fn test_validate_accepts_hmac_settings() {
        assert!(config("change-me", "HS256").validate().is_ok());
        assert!(config("change-me", "HS512").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_secret() {
        assert!(config("", "HS256").validate().is_err());
        assert!(config("   ", "HS256").validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unsupported_algorithm() {
        assert!(config("change-me", "RS256").validate().is_err());
        assert!(config("change-me", "none").validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_lifetimes() {
        let mut cfg = config("change-me", "HS256");
        cfg.jwt.access_token_expire_minutes = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_lifetimes() {
        let mut cfg = config("change-me", "HS256");
        cfg.jwt.refresh_token_expire_days = 1_000_000_000;
        assert!(cfg.validate().is_err());

        let mut cfg = config("change-me", "HS256");
        cfg.jwt.access_token_expire_minutes = i64::MAX;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_lifetimes_follow_settings() {
        let lifetimes = config("change-me", "HS256").jwt.lifetimes().unwrap();
        assert_eq!(lifetimes, TokenLifetimes::default());
    }

    // The only test in this crate that touches the process environment
    #[test]
    fn test_load_reads_secret_from_environment() {
        env::set_var("JWT__SECRET", "secret-from-environment");
        env::set_var("SERVER__HTTP_PORT", "9100");

        let loaded = Config::load();

        env::remove_var("JWT__SECRET");
        env::remove_var("SERVER__HTTP_PORT");

        let loaded = loaded.unwrap();
        assert_eq!(loaded.jwt.secret, "secret-from-environment");
        assert_eq!(loaded.server.http_port, 9100);
        assert_eq!(loaded.jwt.algorithm, "HS256");
        assert_eq!(loaded.jwt.lifetimes().unwrap(), TokenLifetimes::default());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", config("super-secret-value", "HS256").jwt);
        assert!(!rendered.contains("super-secret-value"));
    }

    #[test]
    fn test_jwt_defaults_when_only_secret_is_set() {
        let jwt: JwtConfig = serde_json::from_str(r#"{"secret": "change-me"}"#).unwrap();
        assert_eq!(jwt.algorithm, "HS256");
        assert_eq!(jwt.access_token_expire_minutes, 30);
        assert_eq!(jwt.refresh_token_expire_days, 7);
    }
}
