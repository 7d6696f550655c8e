//! Upload batches and retrieval of stored uploads

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::UploadOutcome;
use crate::state::{ShareState, UploadState};
use crate::utils::multipart::extract_upload_files;
use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use ifshare_core::models::UploadRecord;
use ifshare_core::{AppError, ShareKind};
use ifshare_db::UploadRecordStore;
use ifshare_storage::{storage_key_from_object_path, Storage};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct FileResponse {
    #[serde(flatten)]
    pub record: UploadRecord,
    /// Share link of the upload
    pub url: String,
}

#[utoipa::path(
    post,
    path = "/api/files",
    tag = "files",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Batch stored", body = UploadOutcome),
        (status = 400, description = "No valid files", body = ErrorResponse),
        (status = 413, description = "Every file exceeds the size limit", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(uploads, multipart), fields(operation = "upload_files"))]
pub async fn upload_files(
    State(uploads): State<UploadState>,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    let max_files = uploads.orchestrator.policy().max_files_per_batch;
    let files = extract_upload_files(multipart, max_files).await?;

    let outcome = uploads.orchestrator.upload(files).await?;

    Ok((StatusCode::CREATED, Json(outcome)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/files/{id}",
    tag = "files",
    params(("id" = String, Path, description = "Public id of the upload")),
    responses(
        (status = 200, description = "Upload record", body = FileResponse),
        (status = 404, description = "Unknown id", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(uploads, share), fields(operation = "get_file"))]
pub async fn get_file(
    State(uploads): State<UploadState>,
    State(share): State<ShareState>,
    Path(id): Path<String>,
) -> Result<Response, HttpAppError> {
    let record = find_record(&uploads, &id).await?;
    let url = share.links.url_for(ShareKind::File, &record.id);

    Ok(Json(FileResponse { record, url }).into_response())
}

#[utoipa::path(
    get,
    path = "/api/files/{id}/content",
    tag = "files",
    params(("id" = String, Path, description = "Public id of the upload")),
    responses(
        (status = 200, description = "Decrypted file or archive", content_type = "application/octet-stream"),
        (status = 404, description = "Unknown id or missing object", body = ErrorResponse),
        (status = 500, description = "Storage or decryption failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(uploads), fields(operation = "download_file"))]
pub async fn download_file(
    State(uploads): State<UploadState>,
    Path(id): Path<String>,
) -> Result<Response, HttpAppError> {
    let record = find_record(&uploads, &id).await?;

    let storage_key = storage_key_from_object_path(&record.file_path).ok_or_else(|| {
        AppError::Internal(format!(
            "Upload {} has an unexpected file path {}",
            record.id, record.file_path
        ))
    })?;

    let sealed = uploads.storage.download(storage_key).await?;
    let plaintext = uploads.cipher.decrypt(&sealed)?;

    tracing::debug!(
        id = %record.id,
        key = %storage_key,
        size_bytes = plaintext.len(),
        "Serving decrypted upload"
    );

    let disposition = format!(
        "attachment; filename=\"{}\"",
        record.file_name.replace(['"', '\\', '\r', '\n'], "_")
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, record.file_type.as_str())
        .header(header::CONTENT_DISPOSITION, disposition)
        .header(header::CONTENT_LENGTH, plaintext.len())
        .body(plaintext.into())
        .map_err(|e| HttpAppError(AppError::Internal(format!("Failed to build response: {}", e))))
}

async fn find_record(uploads: &UploadState, id: &str) -> Result<UploadRecord, AppError> {
    uploads
        .records
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Upload {} not found", id)))
}
