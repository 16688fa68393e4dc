//! Blog Backend Module
//!
//! Articles, comments, tags, and favorites. Identity comes from the `auth`
//! crate's middleware; author profiles reuse its `Profile` read model.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects (slug, tag pipeline, pagination),
//!   repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL implementation
//! - `presentation/` - HTTP handlers, DTOs, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::TagUseCase;
pub use error::{BlogError, BlogResult};
pub use infra::postgres::PgBlogRepository;
pub use presentation::router::blog_router;
