mod gate;
mod interactive;
mod service_account;
mod token_store;

pub use gate::{AuthError, AuthorizedClient, CredentialGate, CredentialMode};
pub use interactive::{InteractiveAuth, OAuthSettings};
pub use service_account::{ServiceAccountAuth, ServiceAccountKey};
pub use token_store::{TokenSet, TokenStore};

/// The only scope ever requested: write access to files this application
/// creates, never broader drive access.
pub(crate) const DRIVE_FILE_SCOPE: &str = "https://www.googleapis.com/auth/drive.file";
