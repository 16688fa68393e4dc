//! Article Use Cases
//!
//! Create, edit, delete, read, list, feed, and favorite articles. Only the
//! author may edit or delete an article.

use kernel::id::UserId;
use std::sync::Arc;

use crate::domain::entity::article::{Article, ArticleView, NewArticle};
use crate::domain::repository::{ArticleFilter, ArticleRepository};
use crate::domain::value_object::{Pagination, Slug, tag::prepare_tags};
use crate::error::{BlogError, BlogResult};

/// Create article input
#[derive(Debug, Clone, Default)]
pub struct NewArticleInput {
    pub title: String,
    pub description: String,
    pub body: String,
    pub tag_list: Vec<String>,
}

/// Partial article update; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct ArticleChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
    /// Replaces the whole tag set when present
    pub tag_list: Option<Vec<String>>,
}

/// One page of articles plus the total number of matches
#[derive(Debug, Clone)]
pub struct ArticlePage {
    pub articles: Vec<ArticleView>,
    pub total: i64,
}

pub struct ArticleUseCase<R>
where
    R: ArticleRepository,
{
    repo: Arc<R>,
}

impl<R> ArticleUseCase<R>
where
    R: ArticleRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, author: UserId, input: NewArticleInput) -> BlogResult<ArticleView> {
        require("title", &input.title)?;
        require("description", &input.description)?;
        require("body", &input.body)?;

        let tags = prepare_tags(&input.tag_list);
        let new_article = NewArticle {
            slug: Slug::from_title(&input.title),
            title: input.title,
            description: input.description,
            body: input.body,
            author_id: author,
        };

        let article = self.repo.create(&new_article, &tags).await?;

        tracing::info!(
            article_id = %article.id,
            author_id = %author,
            slug = %article.slug,
            tags = tags.len(),
            "Article created"
        );

        self.view(&article, Some(author)).await
    }

    pub async fn update(
        &self,
        user: UserId,
        slug: &str,
        changes: ArticleChanges,
    ) -> BlogResult<ArticleView> {
        let mut article = self.find(slug).await?;

        if !article.is_authored_by(user) {
            return Err(BlogError::NotArticleAuthorUpdate);
        }

        let ArticleChanges {
            title,
            description,
            body,
            tag_list,
        } = changes;

        if let Some(title) = title {
            not_empty("title", &title)?;
            article.set_title(title);
        }
        if let Some(description) = description {
            not_empty("description", &description)?;
            article.set_description(description);
        }
        if let Some(body) = body {
            not_empty("body", &body)?;
            article.set_body(body);
        }

        let tags = tag_list.map(|tags| prepare_tags(&tags));
        self.repo.update(&article, tags.as_deref()).await?;

        tracing::info!(article_id = %article.id, slug = %article.slug, "Article updated");

        self.view(&article, Some(user)).await
    }

    pub async fn delete(&self, user: UserId, slug: &str) -> BlogResult<()> {
        let article = self.find(slug).await?;

        if !article.is_authored_by(user) {
            return Err(BlogError::NotArticleAuthorDelete);
        }

        if !self.repo.delete(article.id).await? {
            return Err(BlogError::ArticleNotFound);
        }

        tracing::info!(article_id = %article.id, slug = %article.slug, "Article deleted");

        Ok(())
    }

    pub async fn get(&self, slug: &str, viewer: Option<UserId>) -> BlogResult<ArticleView> {
        let article = self.find(slug).await?;
        self.view(&article, viewer).await
    }

    pub async fn list(
        &self,
        filter: &ArticleFilter,
        page: Pagination,
        viewer: Option<UserId>,
    ) -> BlogResult<ArticlePage> {
        let (articles, total) = self.repo.list(filter, page, viewer).await?;
        Ok(ArticlePage { articles, total })
    }

    pub async fn feed(&self, user: UserId, page: Pagination) -> BlogResult<ArticlePage> {
        let (articles, total) = self.repo.feed(user, page).await?;
        Ok(ArticlePage { articles, total })
    }

    pub async fn favorite(&self, user: UserId, slug: &str) -> BlogResult<ArticleView> {
        let article = self.find(slug).await?;

        if self.repo.is_favorited(user, article.id).await? {
            return Err(BlogError::AlreadyFavorited);
        }
        self.repo.favorite(user, article.id).await?;

        tracing::info!(user_id = %user, article_id = %article.id, "Article favorited");

        self.view(&article, Some(user)).await
    }

    pub async fn unfavorite(&self, user: UserId, slug: &str) -> BlogResult<ArticleView> {
        let article = self.find(slug).await?;

        if !self.repo.unfavorite(user, article.id).await? {
            return Err(BlogError::FavoriteNotFound);
        }

        tracing::info!(user_id = %user, article_id = %article.id, "Article unfavorited");

        self.view(&article, Some(user)).await
    }

    async fn find(&self, slug: &str) -> BlogResult<Article> {
        self.repo
            .find_by_slug(slug)
            .await?
            .ok_or(BlogError::ArticleNotFound)
    }

    async fn view(&self, article: &Article, viewer: Option<UserId>) -> BlogResult<ArticleView> {
        self.repo
            .view(article.id, viewer)
            .await?
            .ok_or(BlogError::ArticleNotFound)
    }
}

fn require(field: &str, value: &str) -> BlogResult<()> {
    if value.trim().is_empty() {
        return Err(BlogError::Validation(format!("{field} is required")));
    }
    Ok(())
}

fn not_empty(field: &str, value: &str) -> BlogResult<()> {
    if value.trim().is_empty() {
        return Err(BlogError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}
