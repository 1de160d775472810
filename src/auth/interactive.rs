//! OAuth2 authorization-code flow for user-delegated access.

use std::sync::Arc;

use chrono::{Duration, Utc};
use oauth2::basic::{BasicClient, BasicTokenResponse};
use oauth2::reqwest::async_http_client;
use oauth2::url::Url;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, RedirectUrl, RefreshToken,
    Scope, TokenResponse, TokenUrl,
};

use super::DRIVE_FILE_SCOPE;
use super::gate::AuthError;
use super::token_store::{TokenSet, TokenStore};
use crate::config::ConfigError;

/// Google OAuth2 authorization endpoint.
const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
/// Google OAuth2 token endpoint.
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Settings for the interactive OAuth2 client.
///
/// The endpoint URLs default to Google's and are only overridden in tests.
#[derive(Debug, Clone)]
pub struct OAuthSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
}

impl OAuthSettings {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            auth_url: GOOGLE_AUTH_URL.to_string(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
        }
    }
}

/// Interactive OAuth2 credentials: authorization-code exchange plus
/// transparent access-token refresh through the shared token store.
pub struct InteractiveAuth {
    client: BasicClient,
    store: Arc<TokenStore>,
}

impl InteractiveAuth {
    pub fn new(settings: &OAuthSettings, store: Arc<TokenStore>) -> Result<Self, ConfigError> {
        let client = BasicClient::new(
            ClientId::new(settings.client_id.clone()),
            Some(ClientSecret::new(settings.client_secret.clone())),
            AuthUrl::new(settings.auth_url.clone())
                .map_err(|e| ConfigError::InvalidOAuthUrl(format!("auth URL: {}", e)))?,
            Some(
                TokenUrl::new(settings.token_url.clone())
                    .map_err(|e| ConfigError::InvalidOAuthUrl(format!("token URL: {}", e)))?,
            ),
        )
        .set_redirect_uri(
            RedirectUrl::new(settings.redirect_uri.clone())
                .map_err(|e| ConfigError::InvalidOAuthUrl(format!("redirect URI: {}", e)))?,
        );

        Ok(Self { client, store })
    }

    /// Whether a usable credential is on hand: a refresh token, or an
    /// access token that has not expired yet.
    pub async fn has_credentials(&self) -> bool {
        match self.store.get().await {
            Some(set) => set.refresh_token.is_some() || !set.is_expired(),
            None => false,
        }
    }

    /// Build the provider authorization URL requesting offline access and
    /// the single drive.file scope.
    pub fn authorization_url(&self) -> Url {
        let (url, _csrf_token) = self
            .client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new(DRIVE_FILE_SCOPE.to_string()))
            .add_extra_param("access_type", "offline")
            .add_extra_param("prompt", "consent")
            .url();

        url
    }

    /// Exchange an authorization code and install the resulting token set.
    ///
    /// The store is only written on success; a rejected or reused code
    /// leaves the previous set in place.
    pub async fn complete_authorization(&self, code: &str) -> Result<TokenSet, AuthError> {
        let response = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(async_http_client)
            .await
            .map_err(|e| AuthError::ExchangeFailed(format!("{}", e)))?;

        let set = token_set_from_response(&response, None);
        self.store.replace(set.clone()).await;

        Ok(set)
    }

    /// Get a valid access token, refreshing through the refresh token when
    /// the current one is expired.
    pub async fn access_token(&self) -> Result<String, AuthError> {
        let current = self.store.get().await.ok_or(AuthError::NotAuthenticated)?;

        if !current.is_expired() {
            return Ok(current.access_token.clone());
        }

        let refresh_token = current
            .refresh_token
            .clone()
            .ok_or(AuthError::NotAuthenticated)?;

        tracing::info!("Refreshing expired access token");
        let refreshed = self.refresh(&refresh_token).await?;
        let access_token = refreshed.access_token.clone();
        self.store.replace(refreshed).await;

        Ok(access_token)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenSet, AuthError> {
        let response = self
            .client
            .exchange_refresh_token(&RefreshToken::new(refresh_token.to_string()))
            .request_async(async_http_client)
            .await
            .map_err(|e| {
                // An externally revoked grant lands here; the caller has to
                // go through /auth again
                tracing::warn!("Token refresh rejected by provider: {}", e);
                AuthError::NotAuthenticated
            })?;

        Ok(token_set_from_response(&response, Some(refresh_token)))
    }
}

/// Providers may omit the refresh token in refresh responses; carry the
/// previous one forward so the grant stays usable.
fn token_set_from_response(
    response: &BasicTokenResponse,
    previous_refresh: Option<&str>,
) -> TokenSet {
    let refresh_token = response
        .refresh_token()
        .map(|t| t.secret().clone())
        .or_else(|| previous_refresh.map(str::to_string));

    let expires_in = response
        .expires_in()
        .unwrap_or_else(|| std::time::Duration::from_secs(3600));
    let expires_at = Utc::now() + Duration::from_std(expires_in).unwrap_or_else(|_| Duration::hours(1));

    TokenSet {
        access_token: response.access_token().secret().clone(),
        refresh_token,
        expires_at,
    }
}
