//! Types used by the upload orchestrator

use std::fmt;

use ifshare_core::EncryptedBlob;
use serde::Serialize;
use utoipa::ToSchema;

/// A file as received from the client, before validation
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl IncomingFile {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }
}

/// Limits applied during validation
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_file_size: usize,
    pub max_files_per_batch: usize,
    /// Empty means every content type is accepted. Entries may end in `/*`.
    pub allowed_content_types: Vec<String>,
}

impl UploadPolicy {
    pub fn allows_content_type(&self, content_type: &str) -> bool {
        if self.allowed_content_types.is_empty() {
            return true;
        }
        let content_type = content_type.to_ascii_lowercase();
        self.allowed_content_types.iter().any(|allowed| {
            let allowed = allowed.to_ascii_lowercase();
            match allowed.strip_suffix("/*") {
                Some(family) => content_type
                    .split_once('/')
                    .is_some_and(|(ty, _)| ty == family),
                None => allowed == content_type,
            }
        })
    }
}

/// Pipeline stages, logged on every transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStage {
    Validating,
    Transforming,
    Uploading,
    RecordingMetadata,
    LinkReady,
    Failed,
}

impl fmt::Display for UploadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UploadStage::Validating => "validating",
            UploadStage::Transforming => "transforming",
            UploadStage::Uploading => "uploading",
            UploadStage::RecordingMetadata => "recording_metadata",
            UploadStage::LinkReady => "link_ready",
            UploadStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// The single sealed object produced from a batch
pub(super) struct PreparedUpload {
    pub file_name: String,
    pub file_type: String,
    /// Size of the file (or archive) before encryption
    pub plaintext_size: usize,
    pub sealed: EncryptedBlob,
}

/// Response of a completed upload batch
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UploadOutcome {
    /// Public id of the batch
    pub id: String,
    /// Share link, `<base>/file/<id>`
    pub url: String,
    /// QR code for `url` as a PNG data URL; absent if rendering failed
    pub qr_code: Option<String>,
    pub file_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub storage_key: String,
    pub file_path: String,
    /// False when the upload record could not be written
    pub metadata_recorded: bool,
}
