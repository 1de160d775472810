use bytes::Bytes;
use thiserror::Error;

use crate::types::{NewObject, StoredObject};

/// Errors from the remote object store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("provider returned {status}: {detail}")]
    Provider { status: u16, detail: String },
    #[error("network error: {0}")]
    Network(String),
}

/// Object store trait - implement this for different upload destinations
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Create one object under the target folder. One best-effort attempt;
    /// a mid-stream failure may leave a partial object on the provider side.
    async fn create_object(
        &self,
        access_token: &str,
        object: &NewObject,
        data: Bytes,
    ) -> Result<StoredObject, StoreError>;
}
