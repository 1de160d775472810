use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::auth::AuthError;
use crate::storage::StoreError;

/// Errors surfaced to HTTP callers
#[derive(Debug)]
pub enum ApiError {
    NotAuthenticated,
    AuthorizationExchangeFailed,
    NoFileProvided,
    InvalidRequest(String),
    NotFound,
    UploadFailed,
}

/// JSON error response format
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    success: bool,
    error: String,
    request_id: String,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            ApiError::AuthorizationExchangeFailed => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NoFileProvided => StatusCode::BAD_REQUEST,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::UploadFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::NotAuthenticated => {
                "Not authenticated. Visit /auth to authorize the application.".to_string()
            }
            ApiError::AuthorizationExchangeFailed => "Authorization failed".to_string(),
            ApiError::NoFileProvided => "No file uploaded".to_string(),
            ApiError::InvalidRequest(msg) => msg.clone(),
            ApiError::NotFound => "Not found".to_string(),
            ApiError::UploadFailed => "Upload failed".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_response = ErrorResponse {
            success: false,
            error: self.message(),
            request_id: uuid::Uuid::new_v4().to_string(),
        };

        (self.status_code(), Json(error_response)).into_response()
    }
}

// Provider and credential errors are normalized here: detail goes to the
// server log, the caller gets a generic message.

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NotAuthenticated => ApiError::NotAuthenticated,
            AuthError::ExchangeFailed(detail) => {
                tracing::error!("Authorization code exchange failed: {}", detail);
                ApiError::AuthorizationExchangeFailed
            }
            AuthError::TokenGrant(detail) => {
                tracing::error!("Access token grant failed: {}", detail);
                ApiError::UploadFailed
            }
            AuthError::NotInteractive => {
                ApiError::InvalidRequest("Interactive OAuth is not configured".to_string())
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::error!("Object store error: {}", err);
        ApiError::UploadFailed
    }
}
