//! Auth Router
//!
//! Paths are relative to the `/api` prefix the binary nests them under.

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::repository::{FollowRepository, UserRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, optional_auth, require_auth};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: Arc<AuthConfig>) -> Router {
    auth_router_generic(Arc::new(repo), config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: Arc<R>, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + FollowRepository + Send + Sync + 'static,
{
    let auth = AuthMiddlewareState::new(config.clone());
    let state = AuthAppState { repo, config };

    let public = Router::new()
        .route("/users", post(handlers::register::<R>))
        .route("/users/login", post(handlers::login::<R>));

    let protected = Router::new()
        .route(
            "/user",
            get(handlers::current_user::<R>).put(handlers::update_user::<R>),
        )
        .route(
            "/profiles/{username}/follow",
            post(handlers::follow::<R>).delete(handlers::unfollow::<R>),
        )
        .route_layer(from_fn_with_state(auth.clone(), require_auth));

    let optional = Router::new()
        .route("/profiles/{username}", get(handlers::get_profile::<R>))
        .route_layer(from_fn_with_state(auth, optional_auth));

    public.merge(protected).merge(optional).with_state(state)
}

/// Token debugging endpoints; not mounted in production
pub fn token_debug_router(config: Arc<AuthConfig>) -> Router {
    let auth = AuthMiddlewareState::new(config.clone());
    let tokens = TokenService::new(config);

    let protected = Router::new()
        .route("/auth/validate", get(handlers::validate_token))
        .route("/auth/refresh", post(handlers::refresh_token))
        .route("/auth/protected", get(handlers::protected))
        .route_layer(from_fn_with_state(auth.clone(), require_auth));

    let optional = Router::new()
        .route("/optional/test", get(handlers::optional_test))
        .route_layer(from_fn_with_state(auth, optional_auth));

    Router::new()
        .route("/auth/test-token", post(handlers::test_token))
        .merge(protected)
        .merge(optional)
        .with_state(tokens)
}
