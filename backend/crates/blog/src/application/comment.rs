//! Comment Use Cases

use kernel::id::{CommentId, UserId};
use std::sync::Arc;

use crate::domain::entity::article::Article;
use crate::domain::entity::comment::{CommentView, NewComment};
use crate::domain::repository::{ArticleRepository, CommentRepository};
use crate::error::{BlogError, BlogResult};

pub struct CommentUseCase<A, C>
where
    A: ArticleRepository,
    C: CommentRepository,
{
    articles: Arc<A>,
    comments: Arc<C>,
}

impl<A, C> CommentUseCase<A, C>
where
    A: ArticleRepository,
    C: CommentRepository,
{
    pub fn new(articles: Arc<A>, comments: Arc<C>) -> Self {
        Self { articles, comments }
    }

    /// Comments on the article, newest first
    pub async fn list(&self, slug: &str, viewer: Option<UserId>) -> BlogResult<Vec<CommentView>> {
        let article = self.article(slug).await?;
        self.comments.list_for_article(article.id, viewer).await
    }

    pub async fn create(&self, author: UserId, slug: &str, body: String) -> BlogResult<CommentView> {
        if body.trim().is_empty() {
            return Err(BlogError::EmptyCommentBody);
        }

        let article = self.article(slug).await?;
        let comment = self
            .comments
            .create(&NewComment {
                body,
                author_id: author,
                article_id: article.id,
            })
            .await?;

        tracing::info!(
            comment_id = %comment.id,
            article_id = %article.id,
            author_id = %author,
            "Comment created"
        );

        self.comments
            .view(comment.id, Some(author))
            .await?
            .ok_or(BlogError::CommentNotFound)
    }

    /// Only the comment's author may delete it, and only through the
    /// article it was posted on
    pub async fn delete(&self, user: UserId, slug: &str, id: CommentId) -> BlogResult<()> {
        let article = self.article(slug).await?;

        let comment = self
            .comments
            .find_by_id(id)
            .await?
            .filter(|c| c.belongs_to(article.id))
            .ok_or(BlogError::CommentNotFound)?;

        if !comment.is_authored_by(user) {
            return Err(BlogError::NotCommentAuthor);
        }

        if !self.comments.delete(comment.id).await? {
            return Err(BlogError::CommentNotFound);
        }

        tracing::info!(comment_id = %comment.id, article_id = %article.id, "Comment deleted");

        Ok(())
    }

    async fn article(&self, slug: &str) -> BlogResult<Article> {
        self.articles
            .find_by_slug(slug)
            .await?
            .ok_or(BlogError::ArticleNotFound)
    }
}
