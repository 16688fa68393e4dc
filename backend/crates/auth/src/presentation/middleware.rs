//! Auth Middleware
//!
//! Bearer-token middleware for required and optional authentication.
//! Identity is handed to handlers through request extensions.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::{HeaderMap, header, request::Parts};
use axum::middleware::Next;
use axum::response::Response;
use kernel::id::UserId;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::{Claims, TokenService};
use crate::error::AuthError;

const BEARER_PREFIX: &str = "Bearer ";

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub tokens: TokenService,
}

impl AuthMiddlewareState {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self {
            tokens: TokenService::new(config),
        }
    }
}

/// Authenticated caller, inserted by [`require_auth`]
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub claims: Claims,
    /// The bearer token as presented
    pub token: String,
}

impl AuthUser {
    pub fn id(&self) -> UserId {
        self.claims.user_id()
    }

    pub fn email(&self) -> &str {
        &self.claims.email
    }
}

/// Caller identity when authentication is optional, inserted by [`optional_auth`]
#[derive(Debug, Clone, Default)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl MaybeAuthUser {
    pub fn id(&self) -> Option<UserId> {
        self.0.as_ref().map(AuthUser::id)
    }
}

/// Extract the bearer token, distinguishing each way the header can be wrong
fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = match headers.get(header::AUTHORIZATION) {
        Some(value) => value
            .to_str()
            .map_err(|_| AuthError::InvalidAuthorizationScheme)?,
        None => "",
    };

    if value.is_empty() {
        return Err(AuthError::MissingAuthorization);
    }

    let token = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::InvalidAuthorizationScheme)?;

    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }

    Ok(token)
}

/// Middleware that requires a valid bearer token
pub async fn require_auth(
    State(state): State<AuthMiddlewareState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(req.headers())?;
    let claims = state.tokens.validate(token)?;
    let auth_user = AuthUser {
        claims,
        token: token.to_string(),
    };

    req.extensions_mut().insert(auth_user);

    Ok(next.run(req).await)
}

/// Middleware that accepts a bearer token but never rejects
pub async fn optional_auth(
    State(state): State<AuthMiddlewareState>,
    mut req: Request,
    next: Next,
) -> Response {
    let auth_user = bearer_token(req.headers())
        .ok()
        .and_then(|token| {
            state.tokens.validate(token).ok().map(|claims| AuthUser {
                claims,
                token: token.to_string(),
            })
        });

    req.extensions_mut().insert(MaybeAuthUser(auth_user));

    next.run(req).await
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AuthError::MissingAuthorization)
    }
}

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<MaybeAuthUser>()
            .cloned()
            .unwrap_or_default())
    }
}
