//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::{AuthenticatedUser, UserChanges};
use crate::domain::entity::profile::Profile;

// ============================================================================
// Registration / Login
// ============================================================================

/// POST /api/users body
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub user: RegisterUser,
}

/// Missing fields decode as empty so validation can name them
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// POST /api/users/login body
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub user: LoginUser,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginUser {
    pub email: String,
    pub password: String,
}

// ============================================================================
// Update
// ============================================================================

/// PUT /api/user body
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserRequest {
    pub user: UpdateUser,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub bio: Option<String>,
    pub image: Option<String>,
}

impl From<UpdateUser> for UserChanges {
    fn from(u: UpdateUser) -> Self {
        UserChanges {
            email: u.email,
            username: u.username,
            password: u.password,
            bio: u.bio,
            image: u.image,
        }
    }
}

// ============================================================================
// User Response
// ============================================================================

/// `{"user": {...}}` envelope
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub user: UserBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserBody {
    pub email: String,
    pub token: String,
    pub username: String,
    pub bio: String,
    pub image: String,
}

impl From<AuthenticatedUser> for UserResponse {
    fn from(out: AuthenticatedUser) -> Self {
        let AuthenticatedUser { user, token } = out;
        UserResponse {
            user: UserBody {
                email: user.email.as_str().to_string(),
                token,
                username: user.username.as_str().to_string(),
                bio: user.bio,
                image: user.image,
            },
        }
    }
}

// ============================================================================
// Profile
// ============================================================================

/// `{"profile": {...}}` envelope
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub profile: ProfileBody,
}

/// Public profile; also embedded as the `author` of articles and comments
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileBody {
    pub username: String,
    pub bio: String,
    pub image: String,
    pub following: bool,
}

impl From<Profile> for ProfileBody {
    fn from(p: Profile) -> Self {
        ProfileBody {
            username: p.username.as_str().to_string(),
            bio: p.bio,
            image: p.image,
            following: p.following,
        }
    }
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        ProfileResponse { profile: p.into() }
    }
}

// ============================================================================
// Token debugging
// ============================================================================

/// POST /api/auth/test-token body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TestTokenRequest {
    pub user_id: i64,
    pub email: String,
}

/// Identity carried by a token
#[derive(Debug, Clone, Serialize)]
pub struct TokenUser {
    pub id: i64,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub user: TokenUser,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidateTokenResponse {
    pub valid: bool,
    pub user: TokenUser,
    pub expires_at: DateTime<Utc>,
    pub issued_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProtectedResponse {
    pub message: &'static str,
    pub user: TokenUser,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionalAuthResponse {
    pub message: &'static str,
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<TokenUser>,
}
