//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Fallback signing secret used when none is configured
pub const DEFAULT_JWT_SECRET: &str = "your-secret-key";

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 key for bearer tokens
    pub jwt_secret: Vec<u8>,
    /// Token lifetime (24 hours)
    pub token_ttl: Duration,
    /// `iss` claim
    pub token_issuer: String,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.as_bytes().to_vec(),
            token_ttl: Duration::from_secs(24 * 3600),
            token_issuer: "realworld-backend".to_string(),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with the given signing secret
    pub fn with_secret(secret: impl AsRef<[u8]>) -> Self {
        Self {
            jwt_secret: secret.as_ref().to_vec(),
            ..Default::default()
        }
    }

    /// Whether the insecure fallback secret is in use
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET.as_bytes()
    }

    /// Get token TTL in seconds
    pub fn token_ttl_secs(&self) -> i64 {
        self.token_ttl.as_secs() as i64
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
