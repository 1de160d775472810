mod app_state;
mod auth;
mod config;
mod handlers;
mod server;
mod storage;
mod types;

use std::sync::Arc;

use app_state::AppState;
use auth::{CredentialGate, CredentialMode, InteractiveAuth, ServiceAccountAuth, TokenSet, TokenStore};
use clap::Parser;
use config::{Config, CredentialConfig, NamingPolicy, RawConfig};
use server::create_app;
use storage::{DriveStore, UploadRelay};

// Server configuration
const HOST: &str = "0.0.0.0";
const PORT: u16 = 4000;

// Default configuration values
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// photorelay: accepts photo uploads over HTTP and forwards them to Google Drive
#[derive(Parser, Debug)]
#[command(name = "photorelay")]
#[command(about = "Relay uploaded photos into a Google Drive folder", long_about = None)]
struct Cli {
    /// Host to bind to
    #[arg(long, env = "HOST", default_value = HOST)]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = PORT)]
    port: u16,

    /// Service account key JSON blob (non-interactive deployments)
    #[arg(long, env = "GOOGLE_SERVICE_ACCOUNT_JSON", hide_env_values = true)]
    service_account_json: Option<String>,

    /// OAuth2 client ID (interactive deployments)
    #[arg(long, env = "GOOGLE_CLIENT_ID")]
    client_id: Option<String>,

    /// OAuth2 client secret
    #[arg(long, env = "GOOGLE_CLIENT_SECRET", hide_env_values = true)]
    client_secret: Option<String>,

    /// Redirect URI registered for the OAuth2 client
    #[arg(long, env = "OAUTH_REDIRECT_URI")]
    redirect_uri: Option<String>,

    /// Refresh token from a previous authorization; seeds the token store
    #[arg(long, env = "GOOGLE_REFRESH_TOKEN", hide_env_values = true)]
    refresh_token: Option<String>,

    /// Drive folder that receives the uploads
    #[arg(long, env = "GOOGLE_DRIVE_FOLDER_ID")]
    folder_id: Option<String>,

    /// Exact origin allowed by CORS; permissive when unset
    #[arg(long, env = "ALLOWED_ORIGIN")]
    allowed_origin: Option<String>,

    /// Object naming policy for uploaded files
    #[arg(long, env = "FILE_NAMING", value_enum, default_value = "original")]
    file_naming: NamingPolicy,

    /// Upper bound for the request body, in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    max_upload_bytes: usize,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Parse command line arguments and environment
    let cli = Cli::parse();

    let raw = RawConfig {
        service_account_json: cli.service_account_json,
        client_id: cli.client_id,
        client_secret: cli.client_secret,
        redirect_uri: cli.redirect_uri,
        refresh_token: cli.refresh_token,
        folder_id: cli.folder_id,
        allowed_origin: cli.allowed_origin,
    };

    // A broken configuration must never reach the listener
    let config = match Config::resolve(raw) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Build the credential gate for the configured variant
    let mode = match config.credentials.clone() {
        CredentialConfig::ServiceAccount(key) => {
            tracing::info!("Using service account credentials: {}", key.client_email);
            CredentialMode::ServiceAccount(Arc::new(ServiceAccountAuth::new(key)))
        }
        CredentialConfig::Interactive {
            settings,
            seed_refresh_token,
        } => {
            let store = match seed_refresh_token {
                Some(token) => {
                    tracing::info!("Seeding token store from configured refresh token");
                    Arc::new(TokenStore::seeded(TokenSet::from_refresh_token(token)))
                }
                None => {
                    tracing::info!(
                        "No refresh token configured; visit /auth to authorize before uploading"
                    );
                    Arc::new(TokenStore::new())
                }
            };

            match InteractiveAuth::new(&settings, store) {
                Ok(auth) => CredentialMode::Interactive(Arc::new(auth)),
                Err(e) => {
                    tracing::error!("Invalid configuration: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let gate = Arc::new(CredentialGate::new(mode));
    let store = Arc::new(DriveStore::new());
    let relay = Arc::new(UploadRelay::new(
        store,
        config.folder_id.clone(),
        cli.file_naming,
    ));
    let app_state = AppState::new(gate, relay);

    let app = create_app(app_state, config.allowed_origin.clone(), cli.max_upload_bytes);

    // Start server
    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    tracing::info!(
        "Photo upload relay listening on {}",
        listener.local_addr().unwrap()
    );
    tracing::info!("Uploads land in Drive folder: {}", config.folder_id);

    axum::serve(listener, app).await.unwrap();
}
