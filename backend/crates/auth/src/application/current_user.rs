//! Current User Use Case

use kernel::id::UserId;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::register::AuthenticatedUser;
use crate::application::token::TokenService;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Re-reads the authenticated user and issues a fresh token
pub struct CurrentUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: TokenService,
}

impl<U> CurrentUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            tokens: TokenService::new(config),
        }
    }

    pub async fn execute(&self, user_id: UserId) -> AuthResult<AuthenticatedUser> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let token = self.tokens.issue(user.id, user.email.as_str())?;

        Ok(AuthenticatedUser { user, token })
    }
}
