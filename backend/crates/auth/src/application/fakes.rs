//! In-memory repository used by use-case tests

use chrono::Utc;
use kernel::id::UserId;
use std::collections::HashSet;
use std::sync::Mutex;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::{FollowRepository, UserRepository};
use crate::domain::value_object::{Email, Username};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
pub struct InMemoryAuthRepo {
    users: Mutex<Vec<User>>,
    follows: Mutex<HashSet<(UserId, UserId)>>,
}

impl InMemoryAuthRepo {
    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn follow_count(&self) -> usize {
        self.follows.lock().unwrap().len()
    }
}

impl UserRepository for InMemoryAuthRepo {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }
        if users.iter().any(|u| u.username == user.username) {
            return Err(AuthError::UsernameTaken);
        }

        let now = Utc::now();
        let stored = User {
            id: UserId::new(users.len() as i64 + 1),
            email: user.email.clone(),
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            bio: String::new(),
            image: String::new(),
            created_at: now,
            updated_at: now,
        };
        users.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| &u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| &u.username == username).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().any(|u| &u.email == email))
    }

    async fn exists_by_username(&self, username: &Username) -> AuthResult<bool> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().any(|u| &u.username == username))
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.lock().unwrap();
        if let Some(slot) = users.iter_mut().find(|u| u.id == user.id) {
            *slot = user.clone();
        }
        Ok(())
    }
}

impl FollowRepository for InMemoryAuthRepo {
    async fn follow(&self, follower: UserId, followed: UserId) -> AuthResult<()> {
        if !self.follows.lock().unwrap().insert((follower, followed)) {
            return Err(AuthError::AlreadyFollowing);
        }
        Ok(())
    }

    async fn unfollow(&self, follower: UserId, followed: UserId) -> AuthResult<bool> {
        Ok(self.follows.lock().unwrap().remove(&(follower, followed)))
    }

    async fn is_following(&self, follower: UserId, followed: UserId) -> AuthResult<bool> {
        Ok(self.follows.lock().unwrap().contains(&(follower, followed)))
    }
}
