use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// One uploaded file, buffered in memory for the duration of the request
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub mime_type: String,
    pub data: Bytes,
}

/// Metadata for an object about to be created in the remote store
#[derive(Debug, Clone)]
pub struct NewObject {
    pub name: String,
    pub mime_type: String,
    pub folder_id: String,
}

/// Provider-assigned identity of a stored object
///
/// Matches the Drive create response when requested with `fields=id,name`.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredObject {
    pub id: String,
    pub name: String,
}

/// JSON body for a successful single-file upload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleUploadResponse {
    pub success: bool,
    pub file_id: String,
    pub name: String,
}

/// JSON body for a batch upload, reporting every file's outcome
#[derive(Debug, Serialize)]
pub struct BatchUploadResponse {
    pub success: bool,
    pub files: Vec<BatchEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry {
    pub name: String,
    pub status: BatchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
}

/// Per-file outcome of a batch upload. Processing is sequential and stops
/// at the first failure; files after it are reported as skipped, files
/// before it stay committed on the provider side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    Uploaded,
    Failed,
    Skipped,
}
