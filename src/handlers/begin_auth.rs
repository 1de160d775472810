use crate::{app_state::AppState, auth::AuthError, types::error::ApiError};
use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

/// GET /auth - Send the operator to the provider's authorization page
pub async fn begin_auth(State(app_state): State<AppState>) -> Result<Response, ApiError> {
    match app_state.gate.begin_authorization() {
        Ok(url) => {
            tracing::info!("Redirecting operator to provider authorization page");
            Ok((StatusCode::FOUND, [(header::LOCATION, url.to_string())]).into_response())
        }
        // Service-account deployments have nothing to authorize
        Err(AuthError::NotInteractive) => Ok((
            StatusCode::OK,
            "Service account credentials are active; no authorization is required",
        )
            .into_response()),
        Err(err) => Err(err.into()),
    }
}
