//! Presentation Layer
//!
//! HTTP handlers, DTOs, and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::{BlogAppState, BlogRepository};
pub use router::{blog_router, blog_router_generic};
