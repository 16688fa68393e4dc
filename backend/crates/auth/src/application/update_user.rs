//! Update User Use Case
//!
//! Applies a partial update to the authenticated user's account.

use kernel::id::UserId;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::register::AuthenticatedUser;
use crate::application::token::TokenService;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, RawPassword, UserPassword, Username};
use crate::error::{AuthError, AuthResult};

/// Explicit update set; `None` leaves the field untouched
#[derive(Debug, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub bio: Option<String>,
    pub image: Option<String>,
}

/// Update user use case
pub struct UpdateUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: TokenService,
    config: Arc<AuthConfig>,
}

impl<U> UpdateUserUseCase<U>
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

    pub async fn execute(
        &self,
        user_id: UserId,
        changes: UserChanges,
    ) -> AuthResult<AuthenticatedUser> {
        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if let Some(email) = changes.email {
            let email = Email::new(email)?;
            // Uniqueness only matters when the value actually changes
            if email != user.email {
                if self.user_repo.exists_by_email(&email).await? {
                    return Err(AuthError::EmailTaken);
                }
                user.set_email(email);
            }
        }

        if let Some(username) = changes.username {
            let username = Username::new(username)?;
            if username != user.username {
                if self.user_repo.exists_by_username(&username).await? {
                    return Err(AuthError::UsernameTaken);
                }
                user.set_username(username);
            }
        }

        if let Some(password) = changes.password {
            let raw_password = RawPassword::new(password)?;
            user.set_password(UserPassword::from_raw(&raw_password, self.config.pepper())?);
        }

        if let Some(bio) = changes.bio {
            user.set_bio(bio);
        }

        if let Some(image) = changes.image {
            user.set_image(image);
        }

        self.user_repo.update(&user).await?;

        let token = self.tokens.issue(user.id, user.email.as_str())?;

        tracing::info!(user_id = %user.id, "User updated");

        Ok(AuthenticatedUser { user, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::InMemoryAuthRepo;
    use crate::application::register::{RegisterInput, RegisterUseCase};
    use crate::domain::value_object::RawPassword;

    async fn setup() -> (Arc<InMemoryAuthRepo>, Arc<AuthConfig>, UserId) {
        let repo = Arc::new(InMemoryAuthRepo::default());
        let config = Arc::new(AuthConfig::with_secret("test"));
        let register = RegisterUseCase::new(repo.clone(), config.clone());
        let jake = register
            .execute(RegisterInput {
                username: "jake".to_string(),
                email: "jake@example.com".to_string(),
                password: "jakejake1".to_string(),
            })
            .await
            .unwrap();
        register
            .execute(RegisterInput {
                username: "anna".to_string(),
                email: "anna@example.com".to_string(),
                password: "annaanna1".to_string(),
            })
            .await
            .unwrap();
        (repo, config, jake.user.id)
    }

    #[tokio::test]
    async fn test_bio_and_image_set_verbatim() {
        let (repo, config, id) = setup().await;
        let out = UpdateUserUseCase::new(repo.clone(), config)
            .execute(
                id,
                UserChanges {
                    bio: Some("  I work at statefarm ".to_string()),
                    image: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(out.user.bio, "  I work at statefarm ");
        assert_eq!(out.user.image, "");
        assert_eq!(out.user.username.as_str(), "jake");

        let stored = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.bio, "  I work at statefarm ");
    }

    #[tokio::test]
    async fn test_unchanged_email_skips_uniqueness() {
        let (repo, config, id) = setup().await;
        let out = UpdateUserUseCase::new(repo, config)
            .execute(
                id,
                UserChanges {
                    email: Some(" jake@example.com".to_string()),
                    username: Some("jake".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(out.user.email.as_str(), "jake@example.com");
    }

    #[tokio::test]
    async fn test_email_case_change_is_a_new_address() {
        let (repo, config, id) = setup().await;
        let out = UpdateUserUseCase::new(repo, config)
            .execute(
                id,
                UserChanges {
                    email: Some("Anna@Example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(out.user.email.as_str(), "Anna@Example.com");
    }

    #[tokio::test]
    async fn test_taken_values_conflict() {
        let (repo, config, id) = setup().await;
        let uc = UpdateUserUseCase::new(repo, config);

        let err = uc
            .execute(
                id,
                UserChanges {
                    email: Some("anna@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));

        let err = uc
            .execute(
                id,
                UserChanges {
                    username: Some("anna".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UsernameTaken));
    }

    #[tokio::test]
    async fn test_password_rehashed() {
        let (repo, config, id) = setup().await;
        UpdateUserUseCase::new(repo.clone(), config.clone())
            .execute(
                id,
                UserChanges {
                    password: Some("newpass99".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let stored = repo.find_by_id(id).await.unwrap().unwrap();
        assert!(stored
            .password_hash
            .verify(&RawPassword::for_login("newpass99".to_string()), None));
        assert!(!stored
            .password_hash
            .verify(&RawPassword::for_login("jakejake1".to_string()), None));
    }

    #[tokio::test]
    async fn test_invalid_values_rejected() {
        let (repo, config, id) = setup().await;
        let uc = UpdateUserUseCase::new(repo, config);

        let err = uc
            .execute(
                id,
                UserChanges {
                    password: Some("short".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "password must be at least 6 characters long");

        let err = uc
            .execute(
                id,
                UserChanges {
                    email: Some("not-an-email".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid email format");
    }

    #[tokio::test]
    async fn test_missing_user() {
        let (repo, config, _) = setup().await;
        let err = UpdateUserUseCase::new(repo, config)
            .execute(UserId::new(404), UserChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }
}
