//! Failing doubles for storage and the upload record store.

use async_trait::async_trait;
use ifshare_core::models::{NewUploadRecord, UploadRecord};
use ifshare_core::AppError;
use ifshare_db::UploadRecordStore;
use ifshare_storage::{Storage, StorageBackend, StorageError, StorageResult};

/// Object storage that rejects every write.
pub struct FailingStorage;

#[async_trait]
impl Storage for FailingStorage {
    async fn upload_with_key(
        &self,
        storage_key: &str,
        _data: Vec<u8>,
        _content_type: &str,
    ) -> StorageResult<String> {
        Err(StorageError::UploadFailed(format!(
            "bucket unavailable for {}",
            storage_key
        )))
    }

    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        Err(StorageError::NotFound(storage_key.to_string()))
    }

    async fn exists(&self, _storage_key: &str) -> StorageResult<bool> {
        Ok(false)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

/// Upload record store whose writes always fail.
pub struct FailingUploadStore;

#[async_trait]
impl UploadRecordStore for FailingUploadStore {
    async fn insert(&self, _record: NewUploadRecord) -> Result<UploadRecord, AppError> {
        Err(AppError::Internal("metadata store unavailable".to_string()))
    }

    async fn get(&self, _id: &str) -> Result<Option<UploadRecord>, AppError> {
        Ok(None)
    }

    async fn exists(&self, _id: &str) -> Result<bool, AppError> {
        Ok(false)
    }
}
