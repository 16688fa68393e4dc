//! Blog Error Types
//!
//! Blog-specific error variants rendered through `kernel::error::AppError`.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Blog-specific result type alias
pub type BlogResult<T> = Result<T, BlogError>;

/// Blog-specific error variants
///
/// Display strings are the messages returned in `{"error": ...}` bodies.
#[derive(Debug, Error)]
pub enum BlogError {
    /// Request field validation failed
    #[error("{0}")]
    Validation(String),

    #[error("Comment body is required")]
    EmptyCommentBody,

    #[error("Invalid comment ID")]
    InvalidCommentId,

    #[error("article not found")]
    ArticleNotFound,

    #[error("comment not found")]
    CommentNotFound,

    #[error("unauthorized: you can only update your own articles")]
    NotArticleAuthorUpdate,

    #[error("unauthorized: you can only delete your own articles")]
    NotArticleAuthorDelete,

    #[error("unauthorized: only comment author can delete the comment")]
    NotCommentAuthor,

    #[error("article already favorited")]
    AlreadyFavorited,

    #[error("favorite not found")]
    FavoriteNotFound,

    /// Generated slug collided with an existing article
    #[error("article with this slug already exists")]
    SlugTaken,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BlogError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogError::Validation(_) | BlogError::EmptyCommentBody | BlogError::InvalidCommentId => {
                ErrorKind::BadRequest
            }
            BlogError::NotArticleAuthorUpdate
            | BlogError::NotArticleAuthorDelete
            | BlogError::NotCommentAuthor => ErrorKind::Forbidden,
            BlogError::ArticleNotFound | BlogError::CommentNotFound | BlogError::FavoriteNotFound => {
                ErrorKind::NotFound
            }
            BlogError::AlreadyFavorited | BlogError::SlugTaken => ErrorKind::Conflict,
            BlogError::Database(_) | BlogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            BlogError::Database(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            BlogError::Database(e) => {
                tracing::error!(error = %e, "Blog database error");
            }
            BlogError::Internal(msg) => {
                tracing::error!(message = %msg, "Blog internal error");
            }
            BlogError::NotArticleAuthorUpdate
            | BlogError::NotArticleAuthorDelete
            | BlogError::NotCommentAuthor => {
                tracing::warn!(error = %self, "Ownership check failed");
            }
            _ => {
                tracing::debug!(error = %self, "Blog error");
            }
        }
    }
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}
