//! Object storage setup

use anyhow::{Context, Result};
use ifshare_core::Config;
use ifshare_storage::{create_storage, Storage};
use std::sync::Arc;

pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let storage = create_storage(config)
        .await
        .context("Failed to initialize storage backend")?;

    match config.storage_backend() {
        ifshare_core::StorageBackend::S3 => tracing::info!(
            bucket = ?config.s3_bucket(),
            region = ?config.s3_region().or(config.aws_region()),
            endpoint = ?config.s3_endpoint(),
            "S3 storage initialized"
        ),
        ifshare_core::StorageBackend::Local => tracing::info!(
            path = %config.local_storage_path(),
            "Local storage initialized"
        ),
    }

    Ok(storage)
}
