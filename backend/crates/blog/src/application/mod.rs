//! Application Layer

pub mod article;
pub mod comment;
pub mod tag;

#[cfg(test)]
pub(crate) mod fakes;

pub use article::{ArticleChanges, ArticlePage, ArticleUseCase, NewArticleInput};
pub use comment::CommentUseCase;
pub use tag::TagUseCase;
