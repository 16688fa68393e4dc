//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors are rendered by
//! the `auth` / `blog` crates through `kernel::error::AppError`.

mod config;
mod migrate;

use auth::{PgAuthRepository, auth_router, token_debug_router};
use axum::{
    Json, Router,
    http::{Method, header},
    routing::get,
};
use blog::{PgBlogRepository, TagUseCase, blog_router};
use serde_json::{Value, json};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,blog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    if config.auth.uses_default_secret() {
        tracing::warn!("JWT_SECRET is not set; signing tokens with the built-in default secret");
    }

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    let applied = migrate::run(&pool).await?;

    tracing::info!(applied, "Migrations completed");

    // Startup cleanup: drop tags no article uses any more
    // Errors here should not prevent server startup
    let tags = TagUseCase::new(Arc::new(PgBlogRepository::new(pool.clone())));
    if let Err(e) = tags.prune_unused().await {
        tracing::warn!(error = %e, "Unused tag cleanup failed, continuing anyway");
    }

    let app = build_app(&config, pool);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(environment = %config.environment, "Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Assemble the full HTTP application
fn build_app(config: &AppConfig, pool: PgPool) -> Router {
    let auth_config = Arc::new(config.auth.clone());

    let mut api = Router::new()
        .route("/ping", get(ping))
        .merge(auth_router(
            PgAuthRepository::new(pool.clone()),
            auth_config.clone(),
        ))
        .merge(blog_router(PgBlogRepository::new(pool), auth_config.clone()));

    if !config.is_production() {
        api = api.merge(token_debug_router(auth_config));
    }

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}

/// Every origin is accepted. It is echoed back rather than `*` because
/// credentialed requests forbid the wildcard.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
        ]))
        .allow_credentials(true)
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({"status": "ok", "service": "realworld-backend"}))
}

/// GET /api/ping
async fn ping() -> Json<Value> {
    Json(json!({"message": "pong"}))
}
