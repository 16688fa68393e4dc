//! Login Use Case
//!
//! Verifies email + password and issues a bearer token.
//! Unknown email and wrong password are indistinguishable to the caller.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::register::AuthenticatedUser;
use crate::application::token::TokenService;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, RawPassword};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: TokenService,
    config: Arc<AuthConfig>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            tokens: TokenService::new(config.clone()),
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<AuthenticatedUser> {
        if input.email.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let raw_password = RawPassword::for_login(input.password);
        if !user.password_hash.verify(&raw_password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id, user.email.as_str())?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AuthenticatedUser { user, token })
    }
}
