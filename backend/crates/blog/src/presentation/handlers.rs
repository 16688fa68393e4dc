//! HTTP Handlers

use auth::middleware::{AuthUser, MaybeAuthUser};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use kernel::extract::JsonBody;
use kernel::id::CommentId;
use std::sync::Arc;

use crate::application::{ArticleUseCase, CommentUseCase, TagUseCase};
use crate::domain::repository::{ArticleRepository, CommentRepository, TagRepository};
use crate::domain::value_object::Pagination;
use crate::domain::value_object::pagination::{DEFAULT_FEED_LIMIT, DEFAULT_LIST_LIMIT};
use crate::error::{BlogError, BlogResult};
use crate::presentation::dto::{
    ArticleResponse, ArticlesResponse, CommentResponse, CommentsResponse, CreateArticleRequest,
    CreateCommentRequest, ListArticlesQuery, MessageResponse, PageQuery, TagsQuery, TagsResponse,
    UpdateArticleRequest,
};

/// Everything the blog handlers need from storage
pub trait BlogRepository:
    ArticleRepository + CommentRepository + TagRepository + Send + Sync + 'static
{
}

impl<T> BlogRepository for T where
    T: ArticleRepository + CommentRepository + TagRepository + Send + Sync + 'static
{
}

/// Shared state for blog handlers
pub struct BlogAppState<R: BlogRepository> {
    pub repo: Arc<R>,
}

// `R` itself need not be `Clone`
impl<R: BlogRepository> Clone for BlogAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<R: BlogRepository> BlogAppState<R> {
    fn articles(&self) -> ArticleUseCase<R> {
        ArticleUseCase::new(self.repo.clone())
    }

    fn comments(&self) -> CommentUseCase<R, R> {
        CommentUseCase::new(self.repo.clone(), self.repo.clone())
    }
}

// ============================================================================
// Articles
// ============================================================================

/// GET /api/articles
pub async fn list_articles<R: BlogRepository>(
    State(state): State<BlogAppState<R>>,
    viewer: MaybeAuthUser,
    Query(query): Query<ListArticlesQuery>,
) -> BlogResult<Json<ArticlesResponse>> {
    let page = Pagination::parse(
        query.limit.as_deref(),
        query.offset.as_deref(),
        DEFAULT_LIST_LIMIT,
    );

    let articles = state
        .articles()
        .list(&query.filter(), page, viewer.id())
        .await?;

    Ok(Json(articles.into()))
}

/// GET /api/articles/feed
pub async fn feed<R: BlogRepository>(
    State(state): State<BlogAppState<R>>,
    auth: AuthUser,
    Query(query): Query<PageQuery>,
) -> BlogResult<Json<ArticlesResponse>> {
    let page = Pagination::parse(
        query.limit.as_deref(),
        query.offset.as_deref(),
        DEFAULT_FEED_LIMIT,
    );

    let articles = state.articles().feed(auth.id(), page).await?;

    Ok(Json(articles.into()))
}

/// POST /api/articles
pub async fn create_article<R: BlogRepository>(
    State(state): State<BlogAppState<R>>,
    auth: AuthUser,
    JsonBody(req): JsonBody<CreateArticleRequest>,
) -> BlogResult<(StatusCode, Json<ArticleResponse>)> {
    let article = state.articles().create(auth.id(), req.article.into()).await?;

    Ok((StatusCode::CREATED, Json(article.into())))
}

/// GET /api/articles/{slug}
pub async fn get_article<R: BlogRepository>(
    State(state): State<BlogAppState<R>>,
    viewer: MaybeAuthUser,
    Path(slug): Path<String>,
) -> BlogResult<Json<ArticleResponse>> {
    let article = state.articles().get(&slug, viewer.id()).await?;

    Ok(Json(article.into()))
}

/// PUT /api/articles/{slug}
pub async fn update_article<R: BlogRepository>(
    State(state): State<BlogAppState<R>>,
    auth: AuthUser,
    Path(slug): Path<String>,
    JsonBody(req): JsonBody<UpdateArticleRequest>,
) -> BlogResult<Json<ArticleResponse>> {
    let article = state
        .articles()
        .update(auth.id(), &slug, req.article.into())
        .await?;

    Ok(Json(article.into()))
}

/// DELETE /api/articles/{slug}
pub async fn delete_article<R: BlogRepository>(
    State(state): State<BlogAppState<R>>,
    auth: AuthUser,
    Path(slug): Path<String>,
) -> BlogResult<Json<MessageResponse>> {
    state.articles().delete(auth.id(), &slug).await?;

    Ok(Json(MessageResponse {
        message: "Article deleted successfully",
    }))
}

/// POST /api/articles/{slug}/favorite
pub async fn favorite<R: BlogRepository>(
    State(state): State<BlogAppState<R>>,
    auth: AuthUser,
    Path(slug): Path<String>,
) -> BlogResult<Json<ArticleResponse>> {
    let article = state.articles().favorite(auth.id(), &slug).await?;

    Ok(Json(article.into()))
}

/// DELETE /api/articles/{slug}/favorite
pub async fn unfavorite<R: BlogRepository>(
    State(state): State<BlogAppState<R>>,
    auth: AuthUser,
    Path(slug): Path<String>,
) -> BlogResult<Json<ArticleResponse>> {
    let article = state.articles().unfavorite(auth.id(), &slug).await?;

    Ok(Json(article.into()))
}

// ============================================================================
// Comments
// ============================================================================

/// GET /api/articles/{slug}/comments
pub async fn list_comments<R: BlogRepository>(
    State(state): State<BlogAppState<R>>,
    viewer: MaybeAuthUser,
    Path(slug): Path<String>,
) -> BlogResult<Json<CommentsResponse>> {
    let comments = state.comments().list(&slug, viewer.id()).await?;

    Ok(Json(CommentsResponse {
        comments: comments.into_iter().map(Into::into).collect(),
    }))
}

/// POST /api/articles/{slug}/comments
pub async fn create_comment<R: BlogRepository>(
    State(state): State<BlogAppState<R>>,
    auth: AuthUser,
    Path(slug): Path<String>,
    JsonBody(req): JsonBody<CreateCommentRequest>,
) -> BlogResult<(StatusCode, Json<CommentResponse>)> {
    let comment = state
        .comments()
        .create(auth.id(), &slug, req.comment.body)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CommentResponse {
            comment: comment.into(),
        }),
    ))
}

/// DELETE /api/articles/{slug}/comments/{id}
///
/// Responds 200 with an empty body.
pub async fn delete_comment<R: BlogRepository>(
    State(state): State<BlogAppState<R>>,
    auth: AuthUser,
    Path((slug, id)): Path<(String, String)>,
) -> BlogResult<StatusCode> {
    let id: CommentId = id.parse().map_err(|_| BlogError::InvalidCommentId)?;

    state.comments().delete(auth.id(), &slug, id).await?;

    Ok(StatusCode::OK)
}

// ============================================================================
// Tags
// ============================================================================

/// GET /api/tags
pub async fn list_tags<R: BlogRepository>(
    State(state): State<BlogAppState<R>>,
    Query(query): Query<TagsQuery>,
) -> BlogResult<Json<TagsResponse>> {
    let tags = TagUseCase::new(state.repo.clone())
        .popular(query.limit.as_deref())
        .await?;

    Ok(Json(TagsResponse { tags }))
}
