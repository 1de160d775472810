use crate::types::error::ApiError;
use axum::response::{IntoResponse, Response};

/// Fallback handler for unknown routes
pub async fn not_found() -> Response {
    ApiError::NotFound.into_response()
}
