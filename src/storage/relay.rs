use std::sync::Arc;

use chrono::Utc;

use crate::auth::AuthorizedClient;
use crate::config::NamingPolicy;
use crate::storage::object_store::ObjectStore;
use crate::types::{NewObject, StoredObject, UploadFile, error::ApiError};

/// Forwards one file buffer per call to the object store, under the
/// configured target folder.
pub struct UploadRelay {
    store: Arc<dyn ObjectStore>,
    folder_id: String,
    naming: NamingPolicy,
}

impl UploadRelay {
    pub fn new(store: Arc<dyn ObjectStore>, folder_id: String, naming: NamingPolicy) -> Self {
        Self {
            store,
            folder_id,
            naming,
        }
    }

    /// Upload one file: exactly one create call, no retry, no cleanup of
    /// partial objects on provider-side failure.
    pub async fn upload(
        &self,
        client: &AuthorizedClient,
        file: &UploadFile,
    ) -> Result<StoredObject, ApiError> {
        let access_token = client.bearer_token().await?;

        let object = NewObject {
            name: self.object_name(&file.name),
            mime_type: file.mime_type.clone(),
            folder_id: self.folder_id.clone(),
        };

        tracing::info!(
            "Uploading '{}' as '{}' ({} bytes)",
            file.name,
            object.name,
            file.data.len()
        );

        let stored = self
            .store
            .create_object(&access_token, &object, file.data.clone())
            .await?;

        Ok(stored)
    }

    fn object_name(&self, original: &str) -> String {
        match self.naming {
            NamingPolicy::Original => original.to_string(),
            NamingPolicy::Timestamped => {
                format!("{}-{}", Utc::now().format("%Y%m%dT%H%M%S%3fZ"), original)
            }
        }
    }
}
