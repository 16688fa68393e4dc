//! Profile Use Cases
//!
//! Public profile lookup and follow/unfollow.

use kernel::id::UserId;
use std::sync::Arc;

use crate::domain::entity::{profile::Profile, user::User};
use crate::domain::repository::{FollowRepository, UserRepository};
use crate::domain::value_object::Username;
use crate::error::{AuthError, AuthResult};

/// Profile use cases over a combined user/follow store
pub struct ProfileUseCase<R>
where
    R: UserRepository + FollowRepository,
{
    repo: Arc<R>,
}

impl<R> ProfileUseCase<R>
where
    R: UserRepository + FollowRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Look up a profile; `following` is false for anonymous viewers
    pub async fn get(&self, username: &str, viewer: Option<UserId>) -> AuthResult<Profile> {
        let user = self.find(username).await?;

        let following = match viewer {
            Some(viewer) => self.repo.is_following(viewer, user.id).await?,
            None => false,
        };

        Ok(Profile::of(&user, following))
    }

    pub async fn follow(&self, follower: UserId, username: &str) -> AuthResult<Profile> {
        let user = self.find(username).await?;

        if user.id == follower {
            return Err(AuthError::CannotFollowSelf);
        }

        self.repo.follow(follower, user.id).await?;

        tracing::info!(follower = %follower, followed = %user.id, "User followed");

        Ok(Profile::of(&user, true))
    }

    pub async fn unfollow(&self, follower: UserId, username: &str) -> AuthResult<Profile> {
        let user = self.find(username).await?;

        if !self.repo.unfollow(follower, user.id).await? {
            return Err(AuthError::NotFollowing);
        }

        tracing::info!(follower = %follower, followed = %user.id, "User unfollowed");

        Ok(Profile::of(&user, false))
    }

    async fn find(&self, username: &str) -> AuthResult<User> {
        // A name that could never be registered can't match a row either
        let Ok(username) = Username::new(username) else {
            return Err(AuthError::ProfileNotFound);
        };

        self.repo
            .find_by_username(&username)
            .await?
            .ok_or(AuthError::ProfileNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::AuthConfig;
    use crate::application::fakes::InMemoryAuthRepo;
    use crate::application::register::{RegisterInput, RegisterUseCase};

    async fn setup() -> (Arc<InMemoryAuthRepo>, UserId, UserId) {
        let repo = Arc::new(InMemoryAuthRepo::default());
        let register = RegisterUseCase::new(repo.clone(), Arc::new(AuthConfig::default()));
        let mut ids = Vec::new();
        for name in ["jake", "anna"] {
            let out = register
                .execute(RegisterInput {
                    username: name.to_string(),
                    email: format!("{name}@example.com"),
                    password: "password1".to_string(),
                })
                .await
                .unwrap();
            ids.push(out.user.id);
        }
        (repo, ids[0], ids[1])
    }

    #[tokio::test]
    async fn test_follow_then_get() {
        let (repo, jake, _) = setup().await;
        let uc = ProfileUseCase::new(repo.clone());

        let profile = uc.follow(jake, "anna").await.unwrap();
        assert!(profile.following);
        assert_eq!(profile.username.as_str(), "anna");

        assert!(uc.get("anna", Some(jake)).await.unwrap().following);
        assert!(!uc.get("anna", None).await.unwrap().following);
        assert_eq!(repo.follow_count(), 1);
    }

    #[tokio::test]
    async fn test_follow_errors() {
        let (repo, jake, _) = setup().await;
        let uc = ProfileUseCase::new(repo);

        let err = uc.follow(jake, "jake").await.unwrap_err();
        assert!(matches!(err, AuthError::CannotFollowSelf));

        uc.follow(jake, "anna").await.unwrap();
        let err = uc.follow(jake, "anna").await.unwrap_err();
        assert!(matches!(err, AuthError::AlreadyFollowing));

        let err = uc.follow(jake, "ghost").await.unwrap_err();
        assert!(matches!(err, AuthError::ProfileNotFound));
        assert_eq!(err.to_string(), "user not found");
    }

    #[tokio::test]
    async fn test_unfollow() {
        let (repo, jake, _) = setup().await;
        let uc = ProfileUseCase::new(repo.clone());

        let err = uc.unfollow(jake, "anna").await.unwrap_err();
        assert!(matches!(err, AuthError::NotFollowing));

        uc.follow(jake, "anna").await.unwrap();
        let profile = uc.unfollow(jake, "anna").await.unwrap();
        assert!(!profile.following);
        assert_eq!(repo.follow_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_username_is_not_found() {
        let (repo, _, _) = setup().await;
        let err = ProfileUseCase::new(repo)
            .get("no such user!", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::ProfileNotFound));
    }
}
