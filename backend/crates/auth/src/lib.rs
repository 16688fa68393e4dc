//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Registration and login with email + password
//! - Stateless HS256 bearer tokens (24h lifetime)
//! - Profile lookup and follow/unfollow
//! - Required / optional auth middleware reused by the `blog` crate
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (optional server-side pepper)
//! - Unknown email and wrong password produce the same error
//! - Tokens signed with HMAC-SHA256; any other `alg` is rejected

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::{auth_router, token_debug_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{app_error::AppError, kind::ErrorKind};

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::{ProfileBody, ProfileResponse, UserResponse};
}
