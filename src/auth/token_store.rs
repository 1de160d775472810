//! Process-wide OAuth token state.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

/// The current access/refresh token pair for the remote provider.
#[derive(Debug, Clone)]
pub struct TokenSet {
    /// Access token for API requests.
    pub access_token: String,
    /// Refresh token for obtaining new access tokens, when granted.
    pub refresh_token: Option<String>,
    /// When the access token expires.
    pub expires_at: DateTime<Utc>,
}

impl TokenSet {
    /// Check if the access token is expired or about to expire.
    pub fn is_expired(&self) -> bool {
        // Consider expired if less than 5 minutes remaining
        self.expires_at < Utc::now() + Duration::minutes(5)
    }

    /// Build a set carrying only a refresh token, e.g. one seeded from
    /// configuration. The first use forces a refresh.
    pub fn from_refresh_token(refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: String::new(),
            refresh_token: Some(refresh_token.into()),
            expires_at: Utc::now() - Duration::seconds(1),
        }
    }
}

/// Holder of the single process-wide token set.
///
/// Replacement swaps the inner Arc whole: a concurrent reader observes
/// either the previous set or the new one, never a partially updated set.
#[derive(Debug, Default)]
pub struct TokenStore {
    current: RwLock<Option<Arc<TokenSet>>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding an initial token set.
    pub fn seeded(set: TokenSet) -> Self {
        Self {
            current: RwLock::new(Some(Arc::new(set))),
        }
    }

    /// Get the current token set, if any.
    pub async fn get(&self) -> Option<Arc<TokenSet>> {
        self.current.read().await.clone()
    }

    /// Replace the current token set wholesale.
    pub async fn replace(&self, set: TokenSet) {
        *self.current.write().await = Some(Arc::new(set));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched_set(i: u32) -> TokenSet {
        TokenSet {
            access_token: format!("access-{}", i),
            refresh_token: Some(format!("refresh-{}", i)),
            expires_at: Utc::now() + Duration::hours(1),
        }
    }

    #[test]
    fn test_token_set_expiration() {
        let expired = TokenSet {
            access_token: "test".to_string(),
            refresh_token: None,
            expires_at: Utc::now() - Duration::hours(1),
        };
        assert!(expired.is_expired());

        let valid = TokenSet {
            access_token: "test".to_string(),
            refresh_token: None,
            expires_at: Utc::now() + Duration::hours(1),
        };
        assert!(!valid.is_expired());
    }

    #[test]
    fn test_token_set_near_expiration() {
        // Token expiring in 4 minutes should be considered expired (5 min buffer)
        let set = TokenSet {
            access_token: "test".to_string(),
            refresh_token: None,
            expires_at: Utc::now() + Duration::minutes(4),
        };
        assert!(set.is_expired());
    }

    #[test]
    fn test_seeded_refresh_token_starts_expired() {
        let set = TokenSet::from_refresh_token("seed");

        assert!(set.is_expired());
        assert_eq!(set.refresh_token.as_deref(), Some("seed"));
        assert!(set.access_token.is_empty());
    }

    #[tokio::test]
    async fn test_get_and_replace() {
        let store = TokenStore::new();
        assert!(store.get().await.is_none());

        store.replace(matched_set(1)).await;
        let current = store.get().await.unwrap();
        assert_eq!(current.access_token, "access-1");

        store.replace(matched_set(2)).await;
        let current = store.get().await.unwrap();
        assert_eq!(current.access_token, "access-2");
        assert_eq!(current.refresh_token.as_deref(), Some("refresh-2"));
    }

    #[tokio::test]
    async fn test_replace_is_atomic_under_concurrent_reads() {
        let store = Arc::new(TokenStore::seeded(matched_set(0)));

        let writer = {
            let store = store.clone();
            tokio::spawn(async move {
                for i in 1..=200 {
                    store.replace(matched_set(i)).await;
                }
            })
        };

        let mut readers = Vec::new();
        for _ in 0..4 {
            let store = store.clone();
            readers.push(tokio::spawn(async move {
                for _ in 0..500 {
                    let set = store.get().await.expect("store was seeded");
                    // Access and refresh tokens are written as a matched
                    // pair; a torn read would break the suffix match
                    let suffix = set
                        .access_token
                        .strip_prefix("access-")
                        .expect("unexpected access token");
                    assert_eq!(
                        set.refresh_token.as_deref(),
                        Some(format!("refresh-{}", suffix).as_str())
                    );
                }
            }));
        }

        writer.await.unwrap();
        for reader in readers {
            reader.await.unwrap();
        }
    }
}
