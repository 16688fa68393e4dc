//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use kernel::extract::JsonBody;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::application::{
    CurrentUserUseCase, LoginInput, LoginUseCase, ProfileUseCase, RegisterInput,
    RegisterUseCase, UpdateUserUseCase,
};
use crate::domain::repository::{FollowRepository, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    LoginRequest, OptionalAuthResponse, ProfileResponse, ProtectedResponse, RegisterRequest,
    TestTokenRequest, TokenResponse, TokenUser, UpdateUserRequest, UserResponse,
    ValidateTokenResponse,
};
use crate::presentation::middleware::{AuthUser, MaybeAuthUser};

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: UserRepository + FollowRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// `R` itself need not be `Clone`
impl<R> Clone for AuthAppState<R>
where
    R: UserRepository + FollowRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Users
// ============================================================================

/// POST /api/users
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<UserResponse>)>
where
    R: UserRepository + FollowRepository + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let input = RegisterInput {
        username: req.user.username,
        email: req.user.email,
        password: req.user.password,
    };

    let output = use_case.execute(input).await?;

    Ok((StatusCode::CREATED, Json(output.into())))
}

/// POST /api/users/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + FollowRepository + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let input = LoginInput {
        email: req.user.email,
        password: req.user.password,
    };

    let output = use_case.execute(input).await?;

    Ok(Json(output.into()))
}

/// GET /api/user
pub async fn current_user<R>(
    State(state): State<AuthAppState<R>>,
    auth: AuthUser,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + FollowRepository + Send + Sync + 'static,
{
    let use_case = CurrentUserUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case.execute(auth.id()).await?;

    Ok(Json(output.into()))
}

/// PUT /api/user
pub async fn update_user<R>(
    State(state): State<AuthAppState<R>>,
    auth: AuthUser,
    JsonBody(req): JsonBody<UpdateUserRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + FollowRepository + Send + Sync + 'static,
{
    let use_case = UpdateUserUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case.execute(auth.id(), req.user.into()).await?;

    Ok(Json(output.into()))
}

// ============================================================================
// Profiles
// ============================================================================

/// GET /api/profiles/{username}
pub async fn get_profile<R>(
    State(state): State<AuthAppState<R>>,
    viewer: MaybeAuthUser,
    Path(username): Path<String>,
) -> AuthResult<Json<ProfileResponse>>
where
    R: UserRepository + FollowRepository + Send + Sync + 'static,
{
    let profile = ProfileUseCase::new(state.repo.clone())
        .get(&username, viewer.id())
        .await?;

    Ok(Json(profile.into()))
}

/// POST /api/profiles/{username}/follow
pub async fn follow<R>(
    State(state): State<AuthAppState<R>>,
    auth: AuthUser,
    Path(username): Path<String>,
) -> AuthResult<Json<ProfileResponse>>
where
    R: UserRepository + FollowRepository + Send + Sync + 'static,
{
    let profile = ProfileUseCase::new(state.repo.clone())
        .follow(auth.id(), &username)
        .await?;

    Ok(Json(profile.into()))
}

/// DELETE /api/profiles/{username}/follow
pub async fn unfollow<R>(
    State(state): State<AuthAppState<R>>,
    auth: AuthUser,
    Path(username): Path<String>,
) -> AuthResult<Json<ProfileResponse>>
where
    R: UserRepository + FollowRepository + Send + Sync + 'static,
{
    let profile = ProfileUseCase::new(state.repo.clone())
        .unfollow(auth.id(), &username)
        .await?;

    Ok(Json(profile.into()))
}

// ============================================================================
// Token debugging (non-production only)
// ============================================================================

fn token_user(auth: &AuthUser) -> TokenUser {
    TokenUser {
        id: auth.claims.user_id,
        email: auth.claims.email.clone(),
    }
}

/// POST /api/auth/test-token
pub async fn test_token(
    State(tokens): State<TokenService>,
    JsonBody(req): JsonBody<TestTokenRequest>,
) -> AuthResult<Json<TokenResponse>> {
    if req.user_id <= 0 || req.email.is_empty() {
        return Err(AuthError::Validation(
            "user_id and email are required".to_string(),
        ));
    }

    let token = tokens.issue(req.user_id.into(), &req.email)?;

    Ok(Json(TokenResponse {
        token,
        user: TokenUser {
            id: req.user_id,
            email: req.email,
        },
    }))
}

/// GET /api/auth/validate
pub async fn validate_token(auth: AuthUser) -> Json<ValidateTokenResponse> {
    Json(ValidateTokenResponse {
        valid: true,
        user: token_user(&auth),
        expires_at: auth.claims.expires_at(),
        issued_at: auth.claims.issued_at(),
    })
}

/// POST /api/auth/refresh
pub async fn refresh_token(
    State(tokens): State<TokenService>,
    auth: AuthUser,
) -> AuthResult<Json<TokenResponse>> {
    let token = tokens.refresh(&auth.token)?;

    Ok(Json(TokenResponse {
        token,
        user: token_user(&auth),
    }))
}

/// GET /api/auth/protected
pub async fn protected(auth: AuthUser) -> Json<ProtectedResponse> {
    Json(ProtectedResponse {
        message: "This is a protected endpoint",
        user: token_user(&auth),
        timestamp: auth.claims.issued_at(),
    })
}

/// GET /api/optional/test
pub async fn optional_test(viewer: MaybeAuthUser) -> Json<OptionalAuthResponse> {
    Json(OptionalAuthResponse {
        message: "This endpoint works with or without authentication",
        authenticated: viewer.0.is_some(),
        user: viewer.0.as_ref().map(token_user),
    })
}
