// Library exports for integration tests
pub mod app_state;
pub mod auth;
pub mod config;
pub mod handlers;
pub mod server;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use app_state::AppState;
pub use auth::{
    AuthError, AuthorizedClient, CredentialGate, CredentialMode, InteractiveAuth, OAuthSettings,
    ServiceAccountAuth, ServiceAccountKey, TokenSet, TokenStore,
};
pub use config::{Config, ConfigError, CredentialConfig, NamingPolicy, RawConfig};
pub use storage::{DriveStore, InMemoryStore, ObjectStore, StoreError, UploadRelay};
pub use types::{NewObject, StoredObject, UploadFile};

// Re-export server creation function
pub use server::create_app;
