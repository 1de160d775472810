use bytes::Bytes;
use reqwest::header;

use crate::storage::object_store::{ObjectStore, StoreError};
use crate::types::{NewObject, StoredObject};

/// Google Drive upload endpoint.
const DRIVE_UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3/files";
/// Boundary for the multipart/related upload body.
const UPLOAD_BOUNDARY: &str = "photorelay_boundary";
/// Timeout applied to every outbound Drive call.
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Google Drive backend: one `files` create call per object.
pub struct DriveStore {
    http: reqwest::Client,
    upload_url: String,
}

impl Default for DriveStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DriveStore {
    pub fn new() -> Self {
        Self::with_upload_url(DRIVE_UPLOAD_URL)
    }

    /// Point uploads at a different endpoint (tests, API mirrors).
    pub fn with_upload_url(upload_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent("photorelay/0.1")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            upload_url: upload_url.into(),
        }
    }
}

#[async_trait::async_trait]
impl ObjectStore for DriveStore {
    async fn create_object(
        &self,
        access_token: &str,
        object: &NewObject,
        data: Bytes,
    ) -> Result<StoredObject, StoreError> {
        tracing::debug!(
            "Uploading object to Drive: name={}, {} bytes",
            object.name,
            data.len()
        );

        let metadata = serde_json::json!({
            "name": object.name,
            "parents": [object.folder_id],
        });
        let metadata_json = serde_json::to_string(&metadata)
            .map_err(|e| StoreError::Network(format!("failed to serialize metadata: {}", e)))?;

        // Drive's multipart upload: a JSON metadata part followed by the
        // media part carrying the file bytes
        let mut body = Vec::with_capacity(data.len() + metadata_json.len() + 256);
        body.extend_from_slice(format!("--{}\r\n", UPLOAD_BOUNDARY).as_bytes());
        body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
        body.extend_from_slice(metadata_json.as_bytes());
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(format!("--{}\r\n", UPLOAD_BOUNDARY).as_bytes());
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", object.mime_type).as_bytes());
        body.extend_from_slice(&data);
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(format!("--{}--", UPLOAD_BOUNDARY).as_bytes());

        let response = self
            .http
            .post(&self.upload_url)
            .header(header::AUTHORIZATION, format!("Bearer {}", access_token))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/related; boundary={}", UPLOAD_BOUNDARY),
            )
            .query(&[("uploadType", "multipart"), ("fields", "id,name")])
            .body(body)
            .send()
            .await
            .map_err(|e| StoreError::Network(format!("upload request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::error!(
                "Drive rejected upload of '{}': {} - {}",
                object.name,
                status,
                detail
            );
            return Err(StoreError::Provider {
                status: status.as_u16(),
                detail,
            });
        }

        let stored: StoredObject = response
            .json()
            .await
            .map_err(|e| StoreError::Network(format!("invalid upload response: {}", e)))?;

        tracing::info!("Stored object in Drive: id={}, name={}", stored.id, stored.name);
        Ok(stored)
    }
}
