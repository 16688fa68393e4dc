//! Bearer Token Service
//!
//! Issues and validates HS256 JSON Web Tokens (RFC 7519) carrying the
//! user's id and email. Tokens are stateless; nothing is stored server-side.

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::error::{AuthError, AuthResult};

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Decoded token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub email: String,
    pub iss: String,
    pub sub: String,
    pub exp: i64,
    pub nbf: i64,
    pub iat: i64,
}

impl Claims {
    pub fn user_id(&self) -> UserId {
        UserId::new(self.user_id)
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        timestamp(self.exp)
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        timestamp(self.iat)
    }
}

fn timestamp(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().unwrap_or_default()
}

/// Token issuing/validation service
#[derive(Clone)]
pub struct TokenService {
    config: Arc<AuthConfig>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("issuer", &self.config.token_issuer)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        // Only HS256 is accepted; `exp` and `nbf` are enforced with no leeway
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.validate_nbf = true;
        validation.set_required_spec_claims(&["exp", "nbf"]);

        Self {
            encoding_key: EncodingKey::from_secret(&config.jwt_secret),
            decoding_key: DecodingKey::from_secret(&config.jwt_secret),
            validation,
            config,
        }
    }

    /// Issue a token valid for the configured TTL
    pub fn issue(&self, user_id: UserId, email: &str) -> AuthResult<String> {
        self.issue_at(user_id, email, Utc::now())
    }

    /// Validate signature, algorithm, and time window
    pub fn validate(&self, token: &str) -> AuthResult<Claims> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                AuthError::InvalidToken
            })
    }

    /// Validate `token` and reissue it with fresh timestamps
    pub fn refresh(&self, token: &str) -> AuthResult<String> {
        let claims = self.validate(token)?;
        self.issue(claims.user_id(), &claims.email)
    }

    pub(crate) fn issue_at(
        &self,
        user_id: UserId,
        email: &str,
        now: DateTime<Utc>,
    ) -> AuthResult<String> {
        let iat = now.timestamp();
        let claims = Claims {
            user_id: user_id.value(),
            email: email.to_string(),
            iss: self.config.token_issuer.clone(),
            sub: user_id.to_string(),
            exp: iat + self.config.token_ttl_secs(),
            nbf: iat,
            iat,
        };

        jsonwebtoken::encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }
}
