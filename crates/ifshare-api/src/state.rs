//! Application state and sub-state extractors.
//!
//! Handlers extract the sub-state they need via Axum's `FromRef`.

use ifshare_core::{Config, ShareLinkComposer, SharedSecretCipher};
use ifshare_db::{CodeStore, LibraryStore, NoteStore, UploadRecordStore, UserStore};
use ifshare_storage::Storage;
use sqlx::PgPool;
use std::sync::Arc;

use crate::services::upload::UploadOrchestrator;

/// Database pool, used directly by the health checks.
#[derive(Clone)]
pub struct DbState {
    pub pool: PgPool,
}

/// Upload pipeline plus what file retrieval needs to read uploads back.
#[derive(Clone)]
pub struct UploadState {
    pub orchestrator: Arc<UploadOrchestrator>,
    pub records: Arc<dyn UploadRecordStore>,
    pub storage: Arc<dyn Storage>,
    pub cipher: SharedSecretCipher,
}

/// User registry and per-user libraries.
#[derive(Clone)]
pub struct LibraryState {
    pub users: Arc<dyn UserStore>,
    pub library: Arc<dyn LibraryStore>,
}

/// Code and notes snippet stores.
#[derive(Clone)]
pub struct SnippetState {
    pub codes: Arc<dyn CodeStore>,
    pub notes: Arc<dyn NoteStore>,
}

/// Public link and QR composition.
#[derive(Clone)]
pub struct ShareState {
    pub links: ShareLinkComposer,
}

pub struct AppState {
    pub config: Config,
    pub db: DbState,
    pub uploads: UploadState,
    pub library: LibraryState,
    pub snippets: SnippetState,
    pub share: ShareState,
}

impl axum::extract::FromRef<Arc<AppState>> for DbState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.db.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for UploadState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.uploads.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for LibraryState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.library.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for SnippetState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.snippets.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for ShareState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.share.clone()
    }
}
