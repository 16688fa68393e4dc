//! Article Entity

use auth::models::Profile;
use chrono::{DateTime, Utc};
use kernel::id::{ArticleId, UserId};

use crate::domain::value_object::Slug;

/// Article entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: ArticleId,
    pub slug: Slug,
    pub title: String,
    pub description: String,
    pub body: String,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload; the key and timestamps are assigned by the database
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub slug: Slug,
    pub title: String,
    pub description: String,
    pub body: String,
    pub author_id: UserId,
}

impl Article {
    pub fn is_authored_by(&self, user: UserId) -> bool {
        self.author_id == user
    }

    /// Change the title; the slug is regenerated from it
    pub fn set_title(&mut self, title: String) {
        self.slug = Slug::from_title(&title);
        self.title = title;
        self.touch();
    }

    pub fn set_description(&mut self, description: String) {
        self.description = description;
        self.touch();
    }

    pub fn set_body(&mut self, body: String) {
        self.body = body;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Article as returned to a particular viewer
#[derive(Debug, Clone)]
pub struct ArticleView {
    pub article: Article,
    pub author: Profile,
    /// Sorted alphabetically
    pub tag_list: Vec<String>,
    /// Whether the viewer has favorited it (false for anonymous viewers)
    pub favorited: bool,
    pub favorites_count: i64,
}

impl ArticleView {
    pub fn new(
        article: Article,
        author: Profile,
        mut tag_list: Vec<String>,
        favorited: bool,
        favorites_count: i64,
    ) -> Self {
        tag_list.sort();
        Self {
            article,
            author,
            tag_list,
            favorited,
            favorites_count,
        }
    }
}
