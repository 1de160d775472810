use crate::{app_state::AppState, handlers};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the application router with all routes and middleware
///
/// This function is used by both main.rs and integration tests to ensure
/// the same server configuration is used in both production and tests.
pub fn create_app(
    app_state: AppState,
    allowed_origin: Option<HeaderValue>,
    max_upload_bytes: usize,
) -> Router {
    use handlers::{begin_auth, index, not_found, oauth_callback, upload};

    // Restrict CORS to the configured frontend origin when one is set
    let cors = match allowed_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any),
        None => CorsLayer::permissive(),
    };

    Router::new()
        .route("/", get(index))
        .route("/auth", get(begin_auth))
        .route("/oauth2callback", get(oauth_callback))
        .route("/upload", post(upload))
        // Fallback for unknown routes
        .fallback(not_found)
        // Add shared state
        .with_state(app_state)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors)
        // Add tracing
        .layer(TraceLayer::new_for_http())
}
