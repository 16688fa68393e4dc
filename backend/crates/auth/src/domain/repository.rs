//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::value_object::{Email, Username};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user and return the stored row
    ///
    /// A lost uniqueness race surfaces as `EmailTaken` / `UsernameTaken`.
    async fn create(&self, user: &NewUser) -> AuthResult<User>;

    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<User>>;

    /// Check if email exists
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Check if username exists
    async fn exists_by_username(&self, username: &Username) -> AuthResult<bool>;

    /// Persist all mutable fields of `user`
    async fn update(&self, user: &User) -> AuthResult<()>;
}

/// Follow relationship repository trait
#[trait_variant::make(FollowRepository: Send)]
pub trait LocalFollowRepository {
    /// Record that `follower` follows `followed`
    ///
    /// Returns `AlreadyFollowing` when the pair exists.
    async fn follow(&self, follower: UserId, followed: UserId) -> AuthResult<()>;

    /// Remove the relationship; `false` when there was none
    async fn unfollow(&self, follower: UserId, followed: UserId) -> AuthResult<bool>;

    /// Check whether `follower` follows `followed`
    async fn is_following(&self, follower: UserId, followed: UserId) -> AuthResult<bool>;
}
