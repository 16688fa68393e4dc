//! Profile Read Model
//!
//! Public view of a user as seen by a (possibly anonymous) viewer.

use crate::domain::entity::user::User;
use crate::domain::value_object::Username;

/// Public profile with the viewer-relative `following` flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub username: Username,
    pub bio: String,
    pub image: String,
    pub following: bool,
}

impl Profile {
    pub fn of(user: &User, following: bool) -> Self {
        Self {
            username: user.username.clone(),
            bio: user.bio.clone(),
            image: user.image.clone(),
            following,
        }
    }
}
