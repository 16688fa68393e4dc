//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
///
/// Display strings are the messages returned in `{"error": ...}` bodies.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Field validation failed (email, username, password, request shape)
    #[error("{0}")]
    Validation(String),

    #[error("email already exists")]
    EmailTaken,

    #[error("username already exists")]
    UsernameTaken,

    /// Unknown email or wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Authenticated user no longer exists
    #[error("User not found")]
    UserNotFound,

    /// Profile lookup by username failed
    #[error("user not found")]
    ProfileNotFound,

    #[error("Authorization header is required")]
    MissingAuthorization,

    #[error("Authorization header must start with Bearer")]
    InvalidAuthorizationScheme,

    #[error("Token is required")]
    MissingToken,

    /// Malformed, forged, or expired bearer token
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("cannot follow yourself")]
    CannotFollowSelf,

    #[error("already following this user")]
    AlreadyFollowing,

    #[error("follow relationship not found")]
    NotFollowing,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) | AuthError::CannotFollowSelf => ErrorKind::BadRequest,
            AuthError::EmailTaken | AuthError::UsernameTaken | AuthError::AlreadyFollowing => {
                ErrorKind::Conflict
            }
            AuthError::InvalidCredentials
            | AuthError::MissingAuthorization
            | AuthError::InvalidAuthorizationScheme
            | AuthError::MissingToken
            | AuthError::InvalidToken => ErrorKind::Unauthorized,
            AuthError::UserNotFound | AuthError::ProfileNotFound | AuthError::NotFollowing => {
                ErrorKind::NotFound
            }
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::Database(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidToken => {
                tracing::warn!("Rejected bearer token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<platform::password::PasswordPolicyError> for AuthError {
    fn from(err: platform::password::PasswordPolicyError) -> Self {
        AuthError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::Validation("x".into()).kind().status_code(), 400);
        assert_eq!(AuthError::CannotFollowSelf.kind().status_code(), 400);
        assert_eq!(AuthError::InvalidCredentials.kind().status_code(), 401);
        assert_eq!(AuthError::MissingToken.kind().status_code(), 401);
        assert_eq!(AuthError::UserNotFound.kind().status_code(), 404);
        assert_eq!(AuthError::NotFollowing.kind().status_code(), 404);
        assert_eq!(AuthError::EmailTaken.kind().status_code(), 409);
        assert_eq!(AuthError::AlreadyFollowing.kind().status_code(), 409);
        assert_eq!(AuthError::Internal("x".into()).kind().status_code(), 500);
    }

    #[test]
    fn test_messages_are_client_facing() {
        let err = AuthError::Validation("username is required".into()).into_app_error();
        assert_eq!(err.message(), "username is required");

        let err = AuthError::InvalidAuthorizationScheme.into_app_error();
        assert_eq!(
            err.message(),
            "Authorization header must start with Bearer"
        );
    }

    #[test]
    fn test_password_policy_conversion() {
        let err: AuthError = platform::password::PasswordPolicyError::MissingDigit.into();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert_eq!(err.to_string(), "password must contain at least one number");
    }

    #[test]
    fn test_database_error_uses_kernel_classification() {
        let err = AuthError::Database(sqlx::Error::PoolTimedOut).into_app_error();
        assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);
    }
}
