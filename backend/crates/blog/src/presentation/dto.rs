//! API DTOs (Data Transfer Objects)

use auth::models::ProfileBody;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::{ArticleChanges, ArticlePage, NewArticleInput};
use crate::domain::entity::article::ArticleView;
use crate::domain::entity::comment::CommentView;
use crate::domain::repository::ArticleFilter;

// ============================================================================
// Article Requests
// ============================================================================

/// POST /api/articles body
#[derive(Debug, Clone, Deserialize)]
pub struct CreateArticleRequest {
    pub article: NewArticleBody,
}

/// Missing fields decode as empty so validation can name them
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewArticleBody {
    pub title: String,
    pub description: String,
    pub body: String,
    pub tag_list: Vec<String>,
}

impl From<NewArticleBody> for NewArticleInput {
    fn from(a: NewArticleBody) -> Self {
        NewArticleInput {
            title: a.title,
            description: a.description,
            body: a.body,
            tag_list: a.tag_list,
        }
    }
}

/// PUT /api/articles/{slug} body
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateArticleRequest {
    pub article: UpdateArticleBody,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateArticleBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
    pub tag_list: Option<Vec<String>>,
}

impl From<UpdateArticleBody> for ArticleChanges {
    fn from(a: UpdateArticleBody) -> Self {
        ArticleChanges {
            title: a.title,
            description: a.description,
            body: a.body,
            tag_list: a.tag_list,
        }
    }
}

/// GET /api/articles query; numbers stay strings so junk falls back to defaults
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListArticlesQuery {
    pub tag: Option<String>,
    pub author: Option<String>,
    pub favorited: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl ListArticlesQuery {
    pub fn filter(&self) -> ArticleFilter {
        ArticleFilter {
            tag: self.tag.clone(),
            author: self.author.clone(),
            favorited: self.favorited.clone(),
        }
    }
}

/// GET /api/articles/feed query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// GET /api/tags query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagsQuery {
    pub limit: Option<String>,
}

// ============================================================================
// Article Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleBody {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub tag_list: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub favorited: bool,
    pub favorites_count: i64,
    pub author: ProfileBody,
}

impl From<ArticleView> for ArticleBody {
    fn from(v: ArticleView) -> Self {
        ArticleBody {
            slug: v.article.slug.into_inner(),
            title: v.article.title,
            description: v.article.description,
            body: v.article.body,
            tag_list: v.tag_list,
            created_at: v.article.created_at,
            updated_at: v.article.updated_at,
            favorited: v.favorited,
            favorites_count: v.favorites_count,
            author: v.author.into(),
        }
    }
}

/// `{"article": {...}}` envelope
#[derive(Debug, Clone, Serialize)]
pub struct ArticleResponse {
    pub article: ArticleBody,
}

impl From<ArticleView> for ArticleResponse {
    fn from(v: ArticleView) -> Self {
        Self { article: v.into() }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlesResponse {
    pub articles: Vec<ArticleBody>,
    pub articles_count: i64,
}

impl From<ArticlePage> for ArticlesResponse {
    fn from(page: ArticlePage) -> Self {
        Self {
            articles: page.articles.into_iter().map(Into::into).collect(),
            articles_count: page.total,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ============================================================================
// Comments
// ============================================================================

/// POST /api/articles/{slug}/comments body
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommentRequest {
    pub comment: NewCommentBody,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewCommentBody {
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentBody {
    pub id: i64,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: ProfileBody,
}

impl From<CommentView> for CommentBody {
    fn from(v: CommentView) -> Self {
        CommentBody {
            id: v.comment.id.value(),
            body: v.comment.body,
            created_at: v.comment.created_at,
            updated_at: v.comment.updated_at,
            author: v.author.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub comment: CommentBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentsResponse {
    pub comments: Vec<CommentBody>,
}

// ============================================================================
// Tags
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TagsResponse {
    pub tags: Vec<String>,
}
