//! Value Objects

pub mod pagination;
pub mod slug;
pub mod tag;

pub use pagination::Pagination;
pub use slug::Slug;
