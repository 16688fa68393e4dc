//! Domain Entities

pub mod article;
pub mod comment;
