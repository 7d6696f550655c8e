//! Upload orchestrator
//!
//! Runs one batch through `Validating → Transforming → Uploading →
//! RecordingMetadata → LinkReady`. Any error before the object is stored ends the
//! batch in `Failed` with no storage or database effect. A failed metadata write
//! is logged and reported through `metadata_recorded` instead.

use std::sync::Arc;

use chrono::Utc;
use ifshare_core::constants::{
    ARCHIVE_CONTENT_TYPE, ARCHIVE_FILE_NAME, DEFAULT_CONTENT_TYPE, PUBLIC_ID_MAX_ATTEMPTS,
};
use ifshare_core::models::NewUploadRecord;
use ifshare_core::{
    archive_files, generate_public_id, AppError, NamedBuffer, ShareKind, ShareLinkComposer,
    SharedSecretCipher,
};
use ifshare_db::UploadRecordStore;
use ifshare_storage::{public_object_path, upload_storage_key, Storage};

use super::types::{IncomingFile, PreparedUpload, UploadOutcome, UploadPolicy, UploadStage};

pub struct UploadOrchestrator {
    storage: Arc<dyn Storage>,
    records: Arc<dyn UploadRecordStore>,
    cipher: SharedSecretCipher,
    share: ShareLinkComposer,
    policy: UploadPolicy,
}

impl UploadOrchestrator {
    pub fn new(
        storage: Arc<dyn Storage>,
        records: Arc<dyn UploadRecordStore>,
        cipher: SharedSecretCipher,
        share: ShareLinkComposer,
        policy: UploadPolicy,
    ) -> Self {
        Self {
            storage,
            records,
            cipher,
            share,
            policy,
        }
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Run a batch through the whole pipeline and return its share link.
    #[tracing::instrument(skip(self, files), fields(file_count = files.len()))]
    pub async fn upload(&self, files: Vec<IncomingFile>) -> Result<UploadOutcome, AppError> {
        let result = self.run(files).await;
        if let Err(ref e) = result {
            log_stage(UploadStage::Failed);
            tracing::warn!(error = %e, "Upload batch failed");
        }
        result
    }

    async fn run(&self, files: Vec<IncomingFile>) -> Result<UploadOutcome, AppError> {
        log_stage(UploadStage::Validating);
        let valid = self.validate(files)?;

        log_stage(UploadStage::Transforming);
        let prepared = self.transform(valid)?;
        let storage_key = upload_storage_key(Utc::now().timestamp_millis(), &prepared.file_name);

        log_stage(UploadStage::Uploading);
        let start = std::time::Instant::now();
        let sealed_size = prepared.sealed.len();
        self.storage
            .upload_with_key(
                &storage_key,
                prepared.sealed.bytes,
                &prepared.sealed.content_type,
            )
            .await
            .map_err(|e| {
                tracing::error!(error = %e, key = %storage_key, "Failed to upload to storage");
                AppError::Storage(format!("Failed to upload file: {}", e))
            })?;
        tracing::info!(
            key = %storage_key,
            size_bytes = sealed_size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Upload to storage successful"
        );

        log_stage(UploadStage::RecordingMetadata);
        let id = self.allocate_public_id().await;
        let file_path = public_object_path(&storage_key);
        let file_size = prepared.plaintext_size as i64;
        let metadata_recorded = self
            .record_metadata(NewUploadRecord {
                id: id.clone(),
                file_name: prepared.file_name.clone(),
                file_size,
                file_type: prepared.file_type.clone(),
                file_path: file_path.clone(),
            })
            .await;

        log_stage(UploadStage::LinkReady);
        let url = self.share.url_for(ShareKind::File, &id);
        let qr_code = match self.share.qr_data_url(&url) {
            Ok(qr) => Some(qr),
            Err(e) => {
                tracing::warn!(error = %e, id = %id, "QR code rendering failed");
                None
            }
        };

        tracing::info!(
            id = %id,
            key = %storage_key,
            file_name = %prepared.file_name,
            file_size,
            metadata_recorded,
            "Upload batch complete"
        );

        Ok(UploadOutcome {
            id,
            url,
            qr_code,
            file_name: prepared.file_name,
            file_size,
            file_type: prepared.file_type,
            storage_key,
            file_path,
            metadata_recorded,
        })
    }

    /// Drop oversized and disallowed files.
    fn validate(&self, files: Vec<IncomingFile>) -> Result<Vec<IncomingFile>, AppError> {
        let received = files.len();
        if received > self.policy.max_files_per_batch {
            return Err(AppError::InvalidInput(format!(
                "At most {} files may be uploaded at once",
                self.policy.max_files_per_batch
            )));
        }

        let mut oversized = 0usize;
        let mut valid = Vec::with_capacity(received);

        for file in files {
            if file.bytes.len() > self.policy.max_file_size {
                oversized += 1;
                tracing::warn!(
                    file_name = %file.name,
                    size_bytes = file.bytes.len(),
                    max_bytes = self.policy.max_file_size,
                    "Dropping file over size limit"
                );
            } else if !self.policy.allows_content_type(&file.content_type) {
                tracing::warn!(
                    file_name = %file.name,
                    content_type = %file.content_type,
                    "Dropping file with disallowed content type"
                );
            } else {
                valid.push(file);
            }
        }

        if valid.is_empty() {
            if received > 0 && oversized == received {
                return Err(AppError::PayloadTooLarge(format!(
                    "Every file exceeds the {} byte limit",
                    self.policy.max_file_size
                )));
            }
            return Err(AppError::InvalidInput(
                "No valid files to upload".to_string(),
            ));
        }

        tracing::debug!(received, accepted = valid.len(), "Validation finished");
        Ok(valid)
    }

    /// Archive when there is more than one file, then encrypt.
    fn transform(&self, mut files: Vec<IncomingFile>) -> Result<PreparedUpload, AppError> {
        let (file_name, file_type, plaintext) = if files.len() == 1 {
            let file = files.remove(0);
            let file_type = if file.content_type.trim().is_empty() {
                DEFAULT_CONTENT_TYPE.to_string()
            } else {
                file.content_type
            };
            (file.name, file_type, file.bytes)
        } else {
            let buffers: Vec<NamedBuffer> = files
                .into_iter()
                .map(|f| NamedBuffer::new(f.name, f.bytes))
                .collect();
            let archive = archive_files(&buffers)?;
            (
                ARCHIVE_FILE_NAME.to_string(),
                ARCHIVE_CONTENT_TYPE.to_string(),
                archive,
            )
        };

        let plaintext_size = plaintext.len();
        let sealed = self.cipher.encrypt(&plaintext, &file_type)?;

        Ok(PreparedUpload {
            file_name,
            file_type,
            plaintext_size,
            sealed,
        })
    }

    /// Pick an id not yet used by another upload record, retrying on collision.
    async fn allocate_public_id(&self) -> String {
        let mut candidate = generate_public_id();
        for attempt in 1..=PUBLIC_ID_MAX_ATTEMPTS {
            match self.records.exists(&candidate).await {
                Ok(false) => return candidate,
                Ok(true) => {
                    tracing::debug!(attempt, id = %candidate, "Public id collision, retrying");
                    candidate = generate_public_id();
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Could not check public id, using it unchecked");
                    return candidate;
                }
            }
        }
        tracing::warn!(
            attempts = PUBLIC_ID_MAX_ATTEMPTS,
            "No free public id found, using last candidate unchecked"
        );
        candidate
    }

    async fn record_metadata(&self, record: NewUploadRecord) -> bool {
        let id = record.id.clone();
        match self.records.insert(record).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, id = %id, "Failed to record upload metadata");
                false
            }
        }
    }
}

fn log_stage(stage: UploadStage) {
    tracing::debug!(stage = %stage, "Upload stage");
}
