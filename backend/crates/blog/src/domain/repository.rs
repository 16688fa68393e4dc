//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//! Read models (`ArticleView`, `CommentView`) are resolved relative to an
//! optional viewer so `favorited` / `following` can be computed in one pass.

use kernel::id::{ArticleId, CommentId, UserId};

use crate::domain::entity::article::{Article, ArticleView, NewArticle};
use crate::domain::entity::comment::{Comment, CommentView, NewComment};
use crate::domain::value_object::Pagination;
use crate::error::BlogResult;

/// Filters for the global article list; all present filters must match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    /// Tag name
    pub tag: Option<String>,
    /// Author username
    pub author: Option<String>,
    /// Username of a user who favorited the article
    pub favorited: Option<String>,
}

/// Article repository trait
#[trait_variant::make(ArticleRepository: Send)]
pub trait LocalArticleRepository {
    /// Insert the article and attach `tags` in a single transaction
    ///
    /// A slug collision surfaces as `SlugTaken`.
    async fn create(&self, article: &NewArticle, tags: &[String]) -> BlogResult<Article>;

    async fn find_by_slug(&self, slug: &str) -> BlogResult<Option<Article>>;

    /// Persist mutable fields; `Some(tags)` replaces the tag set atomically
    async fn update(&self, article: &Article, tags: Option<&[String]>) -> BlogResult<()>;

    /// Delete the article (comments, favorites and tag links cascade)
    async fn delete(&self, id: ArticleId) -> BlogResult<bool>;

    /// Resolve the full read model for `viewer`
    async fn view(&self, id: ArticleId, viewer: Option<UserId>) -> BlogResult<Option<ArticleView>>;

    /// Newest first; returns the page and the total number of matches
    async fn list(
        &self,
        filter: &ArticleFilter,
        page: Pagination,
        viewer: Option<UserId>,
    ) -> BlogResult<(Vec<ArticleView>, i64)>;

    /// Articles by authors `user` follows, newest first
    async fn feed(&self, user: UserId, page: Pagination) -> BlogResult<(Vec<ArticleView>, i64)>;

    /// Returns `AlreadyFavorited` when the pair exists
    async fn favorite(&self, user: UserId, article: ArticleId) -> BlogResult<()>;

    /// `false` when there was nothing to remove
    async fn unfavorite(&self, user: UserId, article: ArticleId) -> BlogResult<bool>;

    async fn is_favorited(&self, user: UserId, article: ArticleId) -> BlogResult<bool>;
}

/// Comment repository trait
#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    async fn create(&self, comment: &NewComment) -> BlogResult<Comment>;

    async fn find_by_id(&self, id: CommentId) -> BlogResult<Option<Comment>>;

    /// Comments on `article`, newest first
    async fn list_for_article(
        &self,
        article: ArticleId,
        viewer: Option<UserId>,
    ) -> BlogResult<Vec<CommentView>>;

    async fn view(&self, id: CommentId, viewer: Option<UserId>) -> BlogResult<Option<CommentView>>;

    async fn delete(&self, id: CommentId) -> BlogResult<bool>;
}

/// Tag repository trait
#[trait_variant::make(TagRepository: Send)]
pub trait LocalTagRepository {
    /// Tag names ordered by usage count (desc), then name (asc)
    async fn popular(&self, limit: i64) -> BlogResult<Vec<String>>;

    /// Every tag name, alphabetically
    async fn all(&self) -> BlogResult<Vec<String>>;

    /// Delete tags no article references; returns how many were removed
    async fn delete_unused(&self) -> BlogResult<u64>;
}
