//! The credential gate: decides whether an upload may proceed and with
//! which credential.

use std::sync::Arc;

use oauth2::url::Url;
use thiserror::Error;

use super::interactive::InteractiveAuth;
use super::service_account::ServiceAccountAuth;
use super::token_store::TokenSet;

/// Errors produced while acquiring or exercising credentials.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("authorization code exchange failed: {0}")]
    ExchangeFailed(String),
    #[error("access token grant failed: {0}")]
    TokenGrant(String),
    #[error("interactive OAuth is not configured")]
    NotInteractive,
}

/// The active credential variant, selected once at startup.
pub enum CredentialMode {
    ServiceAccount(Arc<ServiceAccountAuth>),
    Interactive(Arc<InteractiveAuth>),
}

/// Decides, per upload attempt, whether a usable credential exists, and
/// hands out clients that produce bearer tokens for the remote call.
pub struct CredentialGate {
    mode: CredentialMode,
}

impl CredentialGate {
    pub fn new(mode: CredentialMode) -> Self {
        Self { mode }
    }

    /// Check that a usable credential is on hand and build a client for it.
    ///
    /// Service-account deployments always pass. Interactive deployments
    /// pass only once the token store holds a refresh token or an unexpired
    /// access token. Read-only: the token store is mutated only through the
    /// refresh mechanism itself.
    pub async fn authorize(&self) -> Result<AuthorizedClient, AuthError> {
        match &self.mode {
            CredentialMode::ServiceAccount(auth) => {
                Ok(AuthorizedClient::ServiceAccount(auth.clone()))
            }
            CredentialMode::Interactive(auth) => {
                if auth.has_credentials().await {
                    Ok(AuthorizedClient::Interactive(auth.clone()))
                } else {
                    Err(AuthError::NotAuthenticated)
                }
            }
        }
    }

    /// Provider authorization URL for the interactive flow.
    pub fn begin_authorization(&self) -> Result<Url, AuthError> {
        match &self.mode {
            CredentialMode::ServiceAccount(_) => Err(AuthError::NotInteractive),
            CredentialMode::Interactive(auth) => Ok(auth.authorization_url()),
        }
    }

    /// Exchange the callback's authorization code and install the resulting
    /// token set. The previous set is kept on failure, and a reused code
    /// fails the same way an invalid one does.
    pub async fn complete_authorization(&self, code: &str) -> Result<TokenSet, AuthError> {
        match &self.mode {
            CredentialMode::ServiceAccount(_) => Err(AuthError::NotInteractive),
            CredentialMode::Interactive(auth) => auth.complete_authorization(code).await,
        }
    }
}

/// A credential check that passed. Produces bearer tokens on demand,
/// refreshing or minting transparently when the current one is expired.
#[derive(Clone)]
pub enum AuthorizedClient {
    ServiceAccount(Arc<ServiceAccountAuth>),
    Interactive(Arc<InteractiveAuth>),
}

impl AuthorizedClient {
    pub async fn bearer_token(&self) -> Result<String, AuthError> {
        match self {
            AuthorizedClient::ServiceAccount(auth) => auth.access_token().await,
            AuthorizedClient::Interactive(auth) => auth.access_token().await,
        }
    }
}
