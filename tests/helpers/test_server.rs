use std::sync::Arc;

use chrono::{Duration, Utc};
use photorelay::{
    AppState, CredentialGate, CredentialMode, InMemoryStore, InteractiveAuth, NamingPolicy,
    OAuthSettings, ObjectStore, TokenSet, TokenStore, UploadRelay, create_app,
};
use tokio::task::JoinHandle;

pub const TEST_FOLDER_ID: &str = "test-folder";

/// Test server handle that automatically shuts down on drop
///
/// This starts a real HTTP server on a random port for integration testing.
/// The server uses the actual production code via create_app(), and requests
/// are driven through a plain reqwest client (redirects disabled so the
/// /auth handoff to the provider can be asserted).
pub struct TestServer {
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    #[allow(dead_code)] // Keep handle alive to prevent task abort
    handle: JoinHandle<()>,
    pub client: reqwest::Client,
    pub base_url: String,
}

/// OAuth settings pointing at endpoints no test will ever reach.
pub fn default_oauth_settings() -> OAuthSettings {
    OAuthSettings::new(
        "test-client",
        "test-secret",
        "http://localhost:4000/oauth2callback",
    )
}

/// A token set that stays valid for the whole test run.
pub fn valid_token_set() -> TokenSet {
    TokenSet {
        access_token: "test-access-token".to_string(),
        refresh_token: Some("test-refresh".to_string()),
        expires_at: Utc::now() + Duration::hours(1),
    }
}

/// Build an interactive-mode credential gate over the given token store.
pub fn interactive_gate(settings: &OAuthSettings, token_store: Arc<TokenStore>) -> CredentialGate {
    let auth = InteractiveAuth::new(settings, token_store).unwrap();
    CredentialGate::new(CredentialMode::Interactive(Arc::new(auth)))
}

impl TestServer {
    /// Start a server whose gate already holds a valid token set.
    pub async fn start_authenticated(object_store: Arc<dyn ObjectStore>) -> Self {
        let token_store = Arc::new(TokenStore::seeded(valid_token_set()));
        let gate = interactive_gate(&default_oauth_settings(), token_store);
        Self::start_with_gate(gate, object_store, NamingPolicy::Original).await
    }

    /// Start a server with an empty token store.
    pub async fn start_unauthenticated() -> Self {
        let gate = interactive_gate(&default_oauth_settings(), Arc::new(TokenStore::new()));
        Self::start_with_gate(gate, Arc::new(InMemoryStore::new()), NamingPolicy::Original).await
    }

    /// Start a server with an arbitrary gate, store and naming policy
    pub async fn start_with_gate(
        gate: CredentialGate,
        object_store: Arc<dyn ObjectStore>,
        naming: NamingPolicy,
    ) -> Self {
        let relay = UploadRelay::new(object_store, TEST_FOLDER_ID.to_string(), naming);
        let app_state = AppState::new(Arc::new(gate), Arc::new(relay));

        // Use the ACTUAL production create_app function
        let app = create_app(app_state, None, 10 * 1024 * 1024);

        // Bind to a random available port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Create shutdown channel
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        // Spawn server task
        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        // Give the server a moment to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        TestServer {
            shutdown_tx: Some(shutdown_tx),
            handle,
            client,
            base_url: format!("http://{}", addr),
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        // Signal shutdown (ignore errors if already shut down)
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
