//! Comment Entity

use auth::models::Profile;
use chrono::{DateTime, Utc};
use kernel::id::{ArticleId, CommentId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub body: String,
    pub author_id: UserId,
    pub article_id: ArticleId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub body: String,
    pub author_id: UserId,
    pub article_id: ArticleId,
}

impl Comment {
    pub fn is_authored_by(&self, user: UserId) -> bool {
        self.author_id == user
    }

    pub fn belongs_to(&self, article: ArticleId) -> bool {
        self.article_id == article
    }
}

/// Comment with its author's profile as seen by a viewer
#[derive(Debug, Clone)]
pub struct CommentView {
    pub comment: Comment,
    pub author: Profile,
}
