//! Repository and service wiring

use crate::services::upload::{UploadOrchestrator, UploadPolicy};
use crate::state::{AppState, DbState, LibraryState, ShareState, SnippetState, UploadState};
use anyhow::{Context, Result};
use ifshare_core::{Config, ShareLinkComposer, SharedSecretCipher};
use ifshare_db::{
    CodeRepository, LibraryRepository, NoteRepository, UploadRecordStore, UploadRepository,
    UserRepository,
};
use ifshare_storage::Storage;
use sqlx::PgPool;
use std::sync::Arc;

/// Build the application state on top of the Postgres repositories.
pub fn initialize_services(
    config: &Config,
    pool: PgPool,
    storage: Arc<dyn Storage>,
) -> Result<Arc<AppState>> {
    let library = LibraryState {
        users: Arc::new(UserRepository::new(pool.clone())),
        library: Arc::new(LibraryRepository::new(pool.clone())),
    };
    let snippets = SnippetState {
        codes: Arc::new(CodeRepository::new(pool.clone())),
        notes: Arc::new(NoteRepository::new(pool.clone())),
    };
    let records: Arc<dyn UploadRecordStore> = Arc::new(UploadRepository::new(pool.clone()));

    build_state(config, pool, storage, records, library, snippets)
}

/// Assemble [`AppState`] from already constructed stores.
pub fn build_state(
    config: &Config,
    pool: PgPool,
    storage: Arc<dyn Storage>,
    records: Arc<dyn UploadRecordStore>,
    library: LibraryState,
    snippets: SnippetState,
) -> Result<Arc<AppState>> {
    let cipher = SharedSecretCipher::from_base64_key(config.encryption_key())
        .context("Invalid ENCRYPTION_KEY")?;
    let links = ShareLinkComposer::new(config.public_base_url());

    let orchestrator = Arc::new(UploadOrchestrator::new(
        storage.clone(),
        records.clone(),
        cipher.clone(),
        links.clone(),
        UploadPolicy {
            max_file_size: config.max_upload_size_bytes(),
            max_files_per_batch: config.max_files_per_batch(),
            allowed_content_types: config.allowed_upload_content_types().to_vec(),
        },
    ));

    tracing::info!(
        max_upload_size_bytes = config.max_upload_size_bytes(),
        max_files_per_batch = config.max_files_per_batch(),
        storage_backend = %storage.backend_type(),
        "Services initialized"
    );

    Ok(Arc::new(AppState {
        config: config.clone(),
        db: DbState { pool },
        uploads: UploadState {
            orchestrator,
            records,
            storage,
            cipher,
        },
        library,
        snippets,
        share: ShareState { links },
    }))
}
