use crate::{
    app_state::AppState,
    types::{
        BatchEntry, BatchStatus, BatchUploadResponse, SingleUploadResponse, UploadFile,
        error::ApiError,
    },
};
use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bytes::Bytes;

/// Most files accepted in one batch request
const MAX_BATCH_FILES: usize = 10;
/// Multipart field names carrying file parts
const FILE_FIELDS: [&str; 2] = ["photo", "photos"];
/// Fallback MIME type when the client does not send one
const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// POST /upload - Relay uploaded files to the remote store
pub async fn upload(
    State(app_state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    // Fail fast before reading any file bytes
    let client = app_state.gate.authorize().await?;

    let files = collect_files(multipart).await?;
    tracing::info!("Upload request with {} file(s)", files.len());

    if files.len() == 1 {
        let stored = app_state.relay.upload(&client, &files[0]).await?;
        let response = SingleUploadResponse {
            success: true,
            file_id: stored.id,
            name: stored.name,
        };
        return Ok((StatusCode::OK, Json(response)).into_response());
    }

    // Batch: sequential, stop at the first failure, report every file.
    // Files committed before the failure stay on the provider side.
    let mut entries = Vec::with_capacity(files.len());
    let mut failed = false;
    for file in &files {
        if failed {
            entries.push(BatchEntry {
                name: file.name.clone(),
                status: BatchStatus::Skipped,
                file_id: None,
            });
            continue;
        }

        match app_state.relay.upload(&client, file).await {
            Ok(stored) => entries.push(BatchEntry {
                name: file.name.clone(),
                status: BatchStatus::Uploaded,
                file_id: Some(stored.id),
            }),
            Err(err) => {
                // Detail was already logged where the error was normalized
                tracing::warn!("Batch upload stopped at '{}': {:?}", file.name, err);
                failed = true;
                entries.push(BatchEntry {
                    name: file.name.clone(),
                    status: BatchStatus::Failed,
                    file_id: None,
                });
            }
        }
    }

    let status = if failed {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };
    let response = BatchUploadResponse {
        success: !failed,
        files: entries,
    };

    Ok((status, Json(response)).into_response())
}

/// Pull the file parts out of the multipart body. Non-file fields and
/// unknown field names are ignored.
async fn collect_files(mut multipart: Multipart) -> Result<Vec<UploadFile>, ApiError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("Malformed multipart body: {}", e)))?
    {
        let Some(field_name) = field.name().map(str::to_string) else {
            continue;
        };
        if !FILE_FIELDS.contains(&field_name.as_str()) {
            continue;
        }

        let name = field
            .file_name()
            .map(str::to_string)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "unnamed".to_string());
        let mime_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());
        let data: Bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidRequest(format!("Failed to read file '{}': {}", name, e)))?;

        files.push(UploadFile {
            name,
            mime_type,
            data,
        });

        if files.len() > MAX_BATCH_FILES {
            return Err(ApiError::InvalidRequest(format!(
                "Too many files (max {})",
                MAX_BATCH_FILES
            )));
        }
    }

    if files.is_empty() {
        return Err(ApiError::NoFileProvided);
    }

    Ok(files)
}
