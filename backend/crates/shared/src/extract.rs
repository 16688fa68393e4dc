//! Request extractors
//!
//! `JsonBody<T>` behaves like `axum::Json<T>` but rejects with the unified
//! `{"error": "Invalid JSON"}` body instead of axum's plain-text rejection.

use axum::Json;
use axum::extract::{FromRequest, Request};

use crate::error::app_error::AppError;

/// JSON request body with an `AppError` rejection
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = axum::extract::rejection::JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::bad_request("Invalid JSON").with_source(rejection)),
        }
    }
}
