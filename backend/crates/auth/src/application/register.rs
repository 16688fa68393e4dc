//! Register Use Case
//!
//! Creates a new user account and issues its first token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, RawPassword, UserPassword, Username};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// A user together with a freshly issued bearer token
#[derive(Debug)]
pub struct AuthenticatedUser {
    pub user: User,
    pub token: String,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: TokenService,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
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

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<AuthenticatedUser> {
        // Field validation, in request order
        let email = Email::new(&input.email)?;
        let username = Username::new(input.username)?;
        let raw_password = RawPassword::new(input.password)?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }
        if self.user_repo.exists_by_username(&username).await? {
            return Err(AuthError::UsernameTaken);
        }

        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let user = self
            .user_repo
            .create(&NewUser {
                email,
                username,
                password_hash,
            })
            .await?;

        let token = self.tokens.issue(user.id, user.email.as_str())?;

        tracing::info!(
            user_id = %user.id,
            username = %user.username,
            "User registered"
        );

        Ok(AuthenticatedUser { user, token })
    }
}
