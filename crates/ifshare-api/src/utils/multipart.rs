//! Multipart extraction for upload batches

use axum::extract::Multipart;
use ifshare_core::constants::DEFAULT_CONTENT_TYPE;
use ifshare_core::AppError;

use crate::constants::UPLOAD_FIELD_NAME;
use crate::services::upload::IncomingFile;

/// Collect every `file` field of the form. Other fields are ignored.
pub async fn extract_upload_files(
    mut multipart: Multipart,
    max_files: usize,
) -> Result<Vec<IncomingFile>, AppError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        if field.name() != Some(UPLOAD_FIELD_NAME) {
            continue;
        }

        if files.len() == max_files {
            return Err(AppError::InvalidInput(format!(
                "At most {} files may be uploaded at once",
                max_files
            )));
        }

        let name = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("file-{}", files.len() + 1));
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;

        files.push(IncomingFile::new(name, content_type, data.to_vec()));
    }

    if files.is_empty() {
        return Err(AppError::InvalidInput("No file provided".to_string()));
    }

    Ok(files)
}
