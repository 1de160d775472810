use crate::{app_state::AppState, types::error::ApiError};
use axum::extract::{Query, State};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    code: Option<String>,
}

/// GET /oauth2callback - Exchange the authorization code for a token set
///
/// The refresh token is the only durable artifact of the whole flow; it is
/// logged so the operator can copy it into configuration for restarts.
pub async fn oauth_callback(
    State(app_state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<&'static str, ApiError> {
    let code = params
        .code
        .ok_or_else(|| ApiError::InvalidRequest("Missing authorization code".to_string()))?;

    let tokens = app_state.gate.complete_authorization(&code).await?;

    match tokens.refresh_token {
        Some(refresh_token) => tracing::info!(
            "Authorization complete. Set GOOGLE_REFRESH_TOKEN={} to keep this grant across restarts",
            refresh_token
        ),
        None => tracing::warn!(
            "Authorization complete, but the provider returned no refresh token; the grant is lost on restart"
        ),
    }

    Ok("Authorization complete. You can close this tab; uploads are now enabled.")
}
