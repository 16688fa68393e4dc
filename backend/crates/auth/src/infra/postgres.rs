//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::conversions::unique_violation;
use kernel::id::UserId;
use sqlx::PgPool;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::{FollowRepository, UserRepository};
use crate::domain::value_object::{Email, UserPassword, Username};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed user/follow repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a unique violation on `users` to the matching conflict
fn map_user_conflict(err: sqlx::Error) -> AuthError {
    match unique_violation(&err) {
        Some("users_email_key") => AuthError::EmailTaken,
        Some("users_username_key") => AuthError::UsernameTaken,
        _ => AuthError::Database(err),
    }
}

const USER_COLUMNS: &str =
    "id, email, username, password_hash, bio, image, created_at, updated_at";

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (email, username, password_hash)
            VALUES ($1, $2, $3)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.email.as_str())
        .bind(user.username.as_str())
        .bind(user.password_hash.as_phc_string())
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_conflict)?;

        row.into_user()
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn exists_by_username(&self, username: &Username) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                email = $2,
                username = $3,
                password_hash = $4,
                bio = $5,
                image = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(user.id.value())
        .bind(user.email.as_str())
        .bind(user.username.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(&user.bio)
        .bind(&user.image)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_user_conflict)?;

        Ok(())
    }
}

// ============================================================================
// Follow Repository Implementation
// ============================================================================

impl FollowRepository for PgAuthRepository {
    async fn follow(&self, follower: UserId, followed: UserId) -> AuthResult<()> {
        sqlx::query("INSERT INTO follows (follower_id, followed_id) VALUES ($1, $2)")
            .bind(follower.value())
            .bind(followed.value())
            .execute(&self.pool)
            .await
            .map_err(|e| match unique_violation(&e) {
                Some(_) => AuthError::AlreadyFollowing,
                None => AuthError::Database(e),
            })?;

        Ok(())
    }

    async fn unfollow(&self, follower: UserId, followed: UserId) -> AuthResult<bool> {
        let deleted =
            sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND followed_id = $2")
                .bind(follower.value())
                .bind(followed.value())
                .execute(&self.pool)
                .await?
                .rows_affected();

        Ok(deleted > 0)
    }

    async fn is_following(&self, follower: UserId, followed: UserId) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND followed_id = $2)",
        )
        .bind(follower.value())
        .bind(followed.value())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    username: String,
    password_hash: String,
    bio: String,
    image: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        Ok(User {
            id: UserId::new(self.id),
            email: Email::from_db(self.email),
            username: Username::from_db(self.username),
            password_hash: UserPassword::from_phc_string(self.password_hash)?,
            bio: self.bio,
            image: self.image,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
