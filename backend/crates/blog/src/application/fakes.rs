//! In-memory repository used by use-case and router tests

use auth::models::{Profile, Username};
use chrono::Utc;
use kernel::id::{ArticleId, CommentId, UserId};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Mutex;

use crate::domain::entity::article::{Article, ArticleView, NewArticle};
use crate::domain::entity::comment::{Comment, CommentView, NewComment};
use crate::domain::repository::{
    ArticleFilter, ArticleRepository, CommentRepository, TagRepository,
};
use crate::domain::value_object::Pagination;
use crate::error::{BlogError, BlogResult};

#[derive(Default)]
pub struct InMemoryBlogRepo {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    usernames: HashMap<UserId, String>,
    follows: HashSet<(UserId, UserId)>,
    articles: Vec<Article>,
    tags: BTreeSet<String>,
    article_tags: HashMap<ArticleId, Vec<String>>,
    favorites: HashSet<(UserId, ArticleId)>,
    comments: Vec<Comment>,
    last_id: i64,
}

impl InMemoryBlogRepo {
    /// Register a user the fake can resolve author profiles for
    pub fn add_user(&self, id: i64, username: &str) -> UserId {
        let id = UserId::new(id);
        self.state
            .lock()
            .unwrap()
            .usernames
            .insert(id, username.to_string());
        id
    }

    pub fn add_follow(&self, follower: UserId, followed: UserId) {
        self.state.lock().unwrap().follows.insert((follower, followed));
    }

    pub fn article_count(&self) -> usize {
        self.state.lock().unwrap().articles.len()
    }

    pub fn comment_count(&self) -> usize {
        self.state.lock().unwrap().comments.len()
    }

    pub fn tag_names(&self) -> Vec<String> {
        self.state.lock().unwrap().tags.iter().cloned().collect()
    }
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn profile(&self, user: UserId, viewer: Option<UserId>) -> Profile {
        let username = self.usernames.get(&user).cloned().unwrap_or_default();
        Profile {
            username: Username::from_db(username),
            bio: String::new(),
            image: String::new(),
            following: viewer.is_some_and(|v| self.follows.contains(&(v, user))),
        }
    }

    fn user_by_name(&self, username: &str) -> Option<UserId> {
        self.usernames
            .iter()
            .find(|(_, name)| name.as_str() == username)
            .map(|(id, _)| *id)
    }

    fn view(&self, article: &Article, viewer: Option<UserId>) -> ArticleView {
        let favorites_count = self
            .favorites
            .iter()
            .filter(|(_, a)| *a == article.id)
            .count() as i64;
        ArticleView::new(
            article.clone(),
            self.profile(article.author_id, viewer),
            self.article_tags.get(&article.id).cloned().unwrap_or_default(),
            viewer.is_some_and(|v| self.favorites.contains(&(v, article.id))),
            favorites_count,
        )
    }

    fn page(
        &self,
        mut matches: Vec<&Article>,
        page: Pagination,
        viewer: Option<UserId>,
    ) -> (Vec<ArticleView>, i64) {
        // ids grow monotonically, so id order is creation order
        matches.sort_by(|a, b| b.id.cmp(&a.id));
        let total = matches.len() as i64;
        let views = matches
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .map(|a| self.view(a, viewer))
            .collect();
        (views, total)
    }

    fn set_tags(&mut self, article: ArticleId, tags: &[String]) {
        self.tags.extend(tags.iter().cloned());
        self.article_tags.insert(article, tags.to_vec());
    }
}

impl ArticleRepository for InMemoryBlogRepo {
    async fn create(&self, article: &NewArticle, tags: &[String]) -> BlogResult<Article> {
        let mut state = self.state.lock().unwrap();
        if state.articles.iter().any(|a| a.slug == article.slug) {
            return Err(BlogError::SlugTaken);
        }

        let now = Utc::now();
        let stored = Article {
            id: ArticleId::new(state.next_id()),
            slug: article.slug.clone(),
            title: article.title.clone(),
            description: article.description.clone(),
            body: article.body.clone(),
            author_id: article.author_id,
            created_at: now,
            updated_at: now,
        };
        state.articles.push(stored.clone());
        state.set_tags(stored.id, tags);
        Ok(stored)
    }

    async fn find_by_slug(&self, slug: &str) -> BlogResult<Option<Article>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .articles
            .iter()
            .find(|a| a.slug.as_str() == slug)
            .cloned())
    }

    async fn update(&self, article: &Article, tags: Option<&[String]>) -> BlogResult<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(slot) = state.articles.iter_mut().find(|a| a.id == article.id) {
            *slot = article.clone();
        }
        if let Some(tags) = tags {
            state.set_tags(article.id, tags);
        }
        Ok(())
    }

    async fn delete(&self, id: ArticleId) -> BlogResult<bool> {
        let mut state = self.state.lock().unwrap();
        let before = state.articles.len();
        state.articles.retain(|a| a.id != id);
        state.article_tags.remove(&id);
        state.favorites.retain(|(_, a)| *a != id);
        state.comments.retain(|c| c.article_id != id);
        Ok(state.articles.len() < before)
    }

    async fn view(&self, id: ArticleId, viewer: Option<UserId>) -> BlogResult<Option<ArticleView>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .articles
            .iter()
            .find(|a| a.id == id)
            .map(|a| state.view(a, viewer)))
    }

    async fn list(
        &self,
        filter: &ArticleFilter,
        page: Pagination,
        viewer: Option<UserId>,
    ) -> BlogResult<(Vec<ArticleView>, i64)> {
        let state = self.state.lock().unwrap();
        let favoriter = filter.favorited.as_deref().map(|name| state.user_by_name(name));

        let matches = state
            .articles
            .iter()
            .filter(|a| match &filter.tag {
                Some(tag) => state
                    .article_tags
                    .get(&a.id)
                    .is_some_and(|tags| tags.contains(tag)),
                None => true,
            })
            .filter(|a| match &filter.author {
                Some(author) => state.usernames.get(&a.author_id) == Some(author),
                None => true,
            })
            .filter(|a| match favoriter {
                Some(Some(user)) => state.favorites.contains(&(user, a.id)),
                Some(None) => false,
                None => true,
            })
            .collect();

        Ok(state.page(matches, page, viewer))
    }

    async fn feed(&self, user: UserId, page: Pagination) -> BlogResult<(Vec<ArticleView>, i64)> {
        let state = self.state.lock().unwrap();
        let matches = state
            .articles
            .iter()
            .filter(|a| state.follows.contains(&(user, a.author_id)))
            .collect();
        Ok(state.page(matches, page, Some(user)))
    }

    async fn favorite(&self, user: UserId, article: ArticleId) -> BlogResult<()> {
        if !self.state.lock().unwrap().favorites.insert((user, article)) {
            return Err(BlogError::AlreadyFavorited);
        }
        Ok(())
    }

    async fn unfavorite(&self, user: UserId, article: ArticleId) -> BlogResult<bool> {
        Ok(self.state.lock().unwrap().favorites.remove(&(user, article)))
    }

    async fn is_favorited(&self, user: UserId, article: ArticleId) -> BlogResult<bool> {
        Ok(self.state.lock().unwrap().favorites.contains(&(user, article)))
    }
}

impl CommentRepository for InMemoryBlogRepo {
    async fn create(&self, comment: &NewComment) -> BlogResult<Comment> {
        let mut state = self.state.lock().unwrap();
        let now = Utc::now();
        let stored = Comment {
            id: CommentId::new(state.next_id()),
            body: comment.body.clone(),
            author_id: comment.author_id,
            article_id: comment.article_id,
            created_at: now,
            updated_at: now,
        };
        state.comments.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: CommentId) -> BlogResult<Option<Comment>> {
        let state = self.state.lock().unwrap();
        Ok(state.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn list_for_article(
        &self,
        article: ArticleId,
        viewer: Option<UserId>,
    ) -> BlogResult<Vec<CommentView>> {
        let state = self.state.lock().unwrap();
        let mut views: Vec<CommentView> = state
            .comments
            .iter()
            .filter(|c| c.article_id == article)
            .map(|c| CommentView {
                comment: c.clone(),
                author: state.profile(c.author_id, viewer),
            })
            .collect();
        views.sort_by(|a, b| b.comment.id.cmp(&a.comment.id));
        Ok(views)
    }

    async fn view(&self, id: CommentId, viewer: Option<UserId>) -> BlogResult<Option<CommentView>> {
        let state = self.state.lock().unwrap();
        Ok(state.comments.iter().find(|c| c.id == id).map(|c| CommentView {
            comment: c.clone(),
            author: state.profile(c.author_id, viewer),
        }))
    }

    async fn delete(&self, id: CommentId) -> BlogResult<bool> {
        let mut state = self.state.lock().unwrap();
        let before = state.comments.len();
        state.comments.retain(|c| c.id != id);
        Ok(state.comments.len() < before)
    }
}

impl TagRepository for InMemoryBlogRepo {
    async fn popular(&self, limit: i64) -> BlogResult<Vec<String>> {
        let state = self.state.lock().unwrap();
        let mut counts: HashMap<&str, i64> = HashMap::new();
        for tag in state.article_tags.values().flatten() {
            *counts.entry(tag.as_str()).or_default() += 1;
        }

        let mut ranked: Vec<(&str, i64)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        Ok(ranked
            .into_iter()
            .take(limit as usize)
            .map(|(name, _)| name.to_string())
            .collect())
    }

    async fn all(&self) -> BlogResult<Vec<String>> {
        Ok(self.tag_names())
    }

    async fn delete_unused(&self) -> BlogResult<u64> {
        let mut state = self.state.lock().unwrap();
        let used: HashSet<String> = state.article_tags.values().flatten().cloned().collect();
        let before = state.tags.len();
        state.tags.retain(|t| used.contains(t));
        Ok((before - state.tags.len()) as u64)
    }
}
