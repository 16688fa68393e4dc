//! User Entity
//!
//! Registered account. The password hash never leaves the auth crate.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{Email, UserPassword, Username};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Database key
    pub id: UserId,
    /// Login identifier (unique, case-sensitive)
    pub email: Email,
    /// Public handle (unique, case-sensitive)
    pub username: Username,
    /// Argon2id hash
    pub password_hash: UserPassword,
    pub bio: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload; the key and timestamps are assigned by the database
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub username: Username,
    pub password_hash: UserPassword,
}

impl User {
    /// Update email
    pub fn set_email(&mut self, email: Email) {
        self.email = email;
        self.touch();
    }

    /// Update username
    pub fn set_username(&mut self, username: Username) {
        self.username = username;
        self.touch();
    }

    /// Replace the password hash
    pub fn set_password(&mut self, password_hash: UserPassword) {
        self.password_hash = password_hash;
        self.touch();
    }

    /// Update bio (stored verbatim)
    pub fn set_bio(&mut self, bio: String) {
        self.bio = bio;
        self.touch();
    }

    /// Update image URL (stored verbatim)
    pub fn set_image(&mut self, image: String) {
        self.image = image;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
