//! Blog Router
//!
//! Paths are relative to the `/api` prefix the binary nests them under.

use auth::AuthConfig;
use auth::middleware::{AuthMiddlewareState, optional_auth, require_auth};
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::infra::postgres::PgBlogRepository;
use crate::presentation::handlers::{self, BlogAppState, BlogRepository};

/// Create the Blog router with PostgreSQL repository
pub fn blog_router(repo: PgBlogRepository, config: Arc<AuthConfig>) -> Router {
    blog_router_generic(Arc::new(repo), config)
}

/// Create a generic Blog router for any repository implementation
pub fn blog_router_generic<R: BlogRepository>(repo: Arc<R>, config: Arc<AuthConfig>) -> Router {
    let auth = AuthMiddlewareState::new(config);
    let state = BlogAppState { repo };

    let public = Router::new().route("/tags", get(handlers::list_tags::<R>));

    let protected = Router::new()
        .route("/articles", post(handlers::create_article::<R>))
        .route("/articles/feed", get(handlers::feed::<R>))
        .route(
            "/articles/{slug}",
            put(handlers::update_article::<R>).delete(handlers::delete_article::<R>),
        )
        .route(
            "/articles/{slug}/favorite",
            post(handlers::favorite::<R>).delete(handlers::unfavorite::<R>),
        )
        .route(
            "/articles/{slug}/comments",
            post(handlers::create_comment::<R>),
        )
        .route(
            "/articles/{slug}/comments/{id}",
            delete(handlers::delete_comment::<R>),
        )
        .route_layer(from_fn_with_state(auth.clone(), require_auth));

    let optional = Router::new()
        .route("/articles", get(handlers::list_articles::<R>))
        .route("/articles/{slug}", get(handlers::get_article::<R>))
        .route(
            "/articles/{slug}/comments",
            get(handlers::list_comments::<R>),
        )
        .route_layer(from_fn_with_state(auth, optional_auth));

    public.merge(protected).merge(optional).with_state(state)
}
