//! PostgreSQL Repository Implementations
//!
//! Read models are assembled in SQL: tags via `ARRAY(...)`, the favorites
//! count via a `COUNT(*)` sub-select, and the viewer-relative `favorited` /
//! `following` flags via `EXISTS`. A `NULL` viewer makes both flags false.

use auth::models::{Profile, Username};
use chrono::{DateTime, Utc};
use kernel::error::conversions::unique_violation;
use kernel::id::{ArticleId, CommentId, UserId};
use sqlx::{PgConnection, PgPool};

use crate::domain::entity::article::{Article, ArticleView, NewArticle};
use crate::domain::entity::comment::{Comment, CommentView, NewComment};
use crate::domain::repository::{
    ArticleFilter, ArticleRepository, CommentRepository, TagRepository,
};
use crate::domain::value_object::{Pagination, Slug};
use crate::error::{BlogError, BlogResult};

/// PostgreSQL-backed article/comment/tag repository
#[derive(Clone)]
pub struct PgBlogRepository {
    pool: PgPool,
}

impl PgBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_article_conflict(err: sqlx::Error) -> BlogError {
    match unique_violation(&err) {
        Some("articles_slug_key") => BlogError::SlugTaken,
        _ => BlogError::Database(err),
    }
}

const ARTICLE_COLUMNS: &str =
    "id, slug, title, description, body, author_id, created_at, updated_at";

const COMMENT_COLUMNS: &str = "id, body, author_id, article_id, created_at, updated_at";

/// `SELECT` list of an article view; `viewer` is the bind placeholder of
/// the viewing user's id
fn article_view_select(viewer: &str) -> String {
    format!(
        r#"
        SELECT
            a.id, a.slug, a.title, a.description, a.body, a.author_id,
            a.created_at, a.updated_at,
            u.username AS author_username,
            u.bio AS author_bio,
            u.image AS author_image,
            EXISTS(
                SELECT 1 FROM follows fo
                WHERE fo.follower_id = {viewer} AND fo.followed_id = a.author_id
            ) AS author_following,
            ARRAY(
                SELECT t.name FROM article_tags x
                INNER JOIN tags t ON t.id = x.tag_id
                WHERE x.article_id = a.id
                ORDER BY t.name ASC
            ) AS tag_list,
            EXISTS(
                SELECT 1 FROM favorites fv
                WHERE fv.user_id = {viewer} AND fv.article_id = a.id
            ) AS favorited,
            (SELECT COUNT(*) FROM favorites fc WHERE fc.article_id = a.id) AS favorites_count
        FROM articles a
        INNER JOIN users u ON u.id = a.author_id
        "#
    )
}

/// Filters of the global list; binds `$1` tag, `$2` author, `$3` favorited by
const LIST_FILTER: &str = r#"
    WHERE ($1::text IS NULL OR EXISTS(
            SELECT 1 FROM article_tags x
            INNER JOIN tags t ON t.id = x.tag_id
            WHERE x.article_id = a.id AND t.name = $1))
      AND ($2::text IS NULL OR u.username = $2)
      AND ($3::text IS NULL OR EXISTS(
            SELECT 1 FROM favorites fv2
            INNER JOIN users fu ON fu.id = fv2.user_id
            WHERE fv2.article_id = a.id AND fu.username = $3))
"#;

/// Articles written by users `$1` follows
const FEED_FILTER: &str = r#"
    WHERE a.author_id IN (SELECT followed_id FROM follows WHERE follower_id = $1)
"#;

const NEWEST_FIRST: &str = "ORDER BY a.created_at DESC, a.id DESC";

/// Link `tags` to `article`, creating missing tag rows
async fn attach_tags(conn: &mut PgConnection, article: ArticleId, tags: &[String]) -> BlogResult<()> {
    for name in tags {
        let tag_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO tags (name) VALUES ($1)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id
            "#,
        )
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO article_tags (article_id, tag_id) VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(article.value())
        .bind(tag_id)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

// ============================================================================
// Article Repository Implementation
// ============================================================================

impl ArticleRepository for PgBlogRepository {
    async fn create(&self, article: &NewArticle, tags: &[String]) -> BlogResult<Article> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            r#"
            INSERT INTO articles (slug, title, description, body, author_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {ARTICLE_COLUMNS}
            "#
        ))
        .bind(article.slug.as_str())
        .bind(&article.title)
        .bind(&article.description)
        .bind(&article.body)
        .bind(article.author_id.value())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_article_conflict)?;

        let article = row.into_article();
        attach_tags(&mut tx, article.id, tags).await?;

        tx.commit().await?;

        Ok(article)
    }

    async fn find_by_slug(&self, slug: &str) -> BlogResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ArticleRow::into_article))
    }

    async fn update(&self, article: &Article, tags: Option<&[String]>) -> BlogResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE articles SET
                slug = $2,
                title = $3,
                description = $4,
                body = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(article.id.value())
        .bind(article.slug.as_str())
        .bind(&article.title)
        .bind(&article.description)
        .bind(&article.body)
        .bind(article.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_article_conflict)?;

        if let Some(tags) = tags {
            sqlx::query("DELETE FROM article_tags WHERE article_id = $1")
                .bind(article.id.value())
                .execute(&mut *tx)
                .await?;

            attach_tags(&mut tx, article.id, tags).await?;
        }

        tx.commit().await?;

        Ok(())
    }

    async fn delete(&self, id: ArticleId) -> BlogResult<bool> {
        let deleted = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn view(&self, id: ArticleId, viewer: Option<UserId>) -> BlogResult<Option<ArticleView>> {
        let row = sqlx::query_as::<_, ArticleViewRow>(&format!(
            "{} WHERE a.id = $1",
            article_view_select("$2")
        ))
        .bind(id.value())
        .bind(viewer.map(|v| v.value()))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ArticleViewRow::into_view))
    }

    async fn list(
        &self,
        filter: &ArticleFilter,
        page: Pagination,
        viewer: Option<UserId>,
    ) -> BlogResult<(Vec<ArticleView>, i64)> {
        let total = sqlx::query_scalar::<_, i64>(&format!(
            r#"
            SELECT COUNT(*) FROM articles a
            INNER JOIN users u ON u.id = a.author_id
            {LIST_FILTER}
            "#
        ))
        .bind(filter.tag.as_deref())
        .bind(filter.author.as_deref())
        .bind(filter.favorited.as_deref())
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, ArticleViewRow>(&format!(
            "{} {LIST_FILTER} {NEWEST_FIRST} LIMIT $5 OFFSET $6",
            article_view_select("$4")
        ))
        .bind(filter.tag.as_deref())
        .bind(filter.author.as_deref())
        .bind(filter.favorited.as_deref())
        .bind(viewer.map(|v| v.value()))
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((rows.into_iter().map(ArticleViewRow::into_view).collect(), total))
    }

    async fn feed(&self, user: UserId, page: Pagination) -> BlogResult<(Vec<ArticleView>, i64)> {
        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM articles a {FEED_FILTER}"
        ))
        .bind(user.value())
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, ArticleViewRow>(&format!(
            "{} {FEED_FILTER} {NEWEST_FIRST} LIMIT $2 OFFSET $3",
            article_view_select("$1")
        ))
        .bind(user.value())
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((rows.into_iter().map(ArticleViewRow::into_view).collect(), total))
    }

    async fn favorite(&self, user: UserId, article: ArticleId) -> BlogResult<()> {
        sqlx::query("INSERT INTO favorites (user_id, article_id) VALUES ($1, $2)")
            .bind(user.value())
            .bind(article.value())
            .execute(&self.pool)
            .await
            .map_err(|e| match unique_violation(&e) {
                Some(_) => BlogError::AlreadyFavorited,
                None => BlogError::Database(e),
            })?;

        Ok(())
    }

    async fn unfavorite(&self, user: UserId, article: ArticleId) -> BlogResult<bool> {
        let deleted = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND article_id = $2")
            .bind(user.value())
            .bind(article.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn is_favorited(&self, user: UserId, article: ArticleId) -> BlogResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM favorites WHERE user_id = $1 AND article_id = $2)",
        )
        .bind(user.value())
        .bind(article.value())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

// ============================================================================
// Comment Repository Implementation
// ============================================================================

/// `SELECT` list of a comment view; `$2` is the viewer
const COMMENT_VIEW_SELECT: &str = r#"
    SELECT
        c.id, c.body, c.author_id, c.article_id, c.created_at, c.updated_at,
        u.username AS author_username,
        u.bio AS author_bio,
        u.image AS author_image,
        EXISTS(
            SELECT 1 FROM follows fo
            WHERE fo.follower_id = $2 AND fo.followed_id = c.author_id
        ) AS author_following
    FROM comments c
    INNER JOIN users u ON u.id = c.author_id
"#;

impl CommentRepository for PgBlogRepository {
    async fn create(&self, comment: &NewComment) -> BlogResult<Comment> {
        let row = sqlx::query_as::<_, CommentRow>(&format!(
            r#"
            INSERT INTO comments (body, author_id, article_id)
            VALUES ($1, $2, $3)
            RETURNING {COMMENT_COLUMNS}
            "#
        ))
        .bind(&comment.body)
        .bind(comment.author_id.value())
        .bind(comment.article_id.value())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_comment())
    }

    async fn find_by_id(&self, id: CommentId) -> BlogResult<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"
        ))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CommentRow::into_comment))
    }

    async fn list_for_article(
        &self,
        article: ArticleId,
        viewer: Option<UserId>,
    ) -> BlogResult<Vec<CommentView>> {
        let rows = sqlx::query_as::<_, CommentViewRow>(&format!(
            "{COMMENT_VIEW_SELECT} WHERE c.article_id = $1 ORDER BY c.created_at DESC, c.id DESC"
        ))
        .bind(article.value())
        .bind(viewer.map(|v| v.value()))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CommentViewRow::into_view).collect())
    }

    async fn view(&self, id: CommentId, viewer: Option<UserId>) -> BlogResult<Option<CommentView>> {
        let row = sqlx::query_as::<_, CommentViewRow>(&format!(
            "{COMMENT_VIEW_SELECT} WHERE c.id = $1"
        ))
        .bind(id.value())
        .bind(viewer.map(|v| v.value()))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CommentViewRow::into_view))
    }

    async fn delete(&self, id: CommentId) -> BlogResult<bool> {
        let deleted = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Tag Repository Implementation
// ============================================================================

impl TagRepository for PgBlogRepository {
    async fn popular(&self, limit: i64) -> BlogResult<Vec<String>> {
        let tags = sqlx::query_scalar::<_, String>(
            r#"
            SELECT t.name FROM tags t
            INNER JOIN article_tags x ON x.tag_id = t.id
            GROUP BY t.id, t.name
            ORDER BY COUNT(x.article_id) DESC, t.name ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(tags)
    }

    async fn all(&self) -> BlogResult<Vec<String>> {
        let tags = sqlx::query_scalar::<_, String>("SELECT name FROM tags ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(tags)
    }

    async fn delete_unused(&self) -> BlogResult<u64> {
        let deleted = sqlx::query(
            r#"
            DELETE FROM tags
            WHERE NOT EXISTS (SELECT 1 FROM article_tags x WHERE x.tag_id = tags.id)
            "#,
        )
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct ArticleRow {
    id: i64,
    slug: String,
    title: String,
    description: String,
    body: String,
    author_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ArticleRow {
    fn into_article(self) -> Article {
        Article {
            id: ArticleId::new(self.id),
            slug: Slug::from_db(self.slug),
            title: self.title,
            description: self.description,
            body: self.body,
            author_id: UserId::new(self.author_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AuthorColumns {
    author_username: String,
    author_bio: String,
    author_image: String,
    author_following: bool,
}

impl AuthorColumns {
    fn into_profile(self) -> Profile {
        Profile {
            username: Username::from_db(self.author_username),
            bio: self.author_bio,
            image: self.author_image,
            following: self.author_following,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ArticleViewRow {
    #[sqlx(flatten)]
    article: ArticleRow,
    #[sqlx(flatten)]
    author: AuthorColumns,
    tag_list: Vec<String>,
    favorited: bool,
    favorites_count: i64,
}

impl ArticleViewRow {
    fn into_view(self) -> ArticleView {
        ArticleView::new(
            self.article.into_article(),
            self.author.into_profile(),
            self.tag_list,
            self.favorited,
            self.favorites_count,
        )
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    body: String,
    author_id: i64,
    article_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            id: CommentId::new(self.id),
            body: self.body,
            author_id: UserId::new(self.author_id),
            article_id: ArticleId::new(self.article_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentViewRow {
    #[sqlx(flatten)]
    comment: CommentRow,
    #[sqlx(flatten)]
    author: AuthorColumns,
}

impl CommentViewRow {
    fn into_view(self) -> CommentView {
        CommentView {
            comment: self.comment.into_comment(),
            author: self.author.into_profile(),
        }
    }
}
