//! Store traits implemented by the Postgres repositories

use async_trait::async_trait;
use ifshare_core::models::{
    AddEntryOutcome, CodeSnippet, LibraryKind, NewUploadRecord, Note, SaveCodeRequest,
    SaveNoteRequest, UploadRecord, User, UserLibrary,
};
use ifshare_core::AppError;

#[async_trait]
pub trait UploadRecordStore: Send + Sync {
    async fn insert(&self, record: NewUploadRecord) -> Result<UploadRecord, AppError>;

    async fn get(&self, id: &str) -> Result<Option<UploadRecord>, AppError>;

    async fn exists(&self, id: &str) -> Result<bool, AppError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert the user, or refresh name/image when given.
    async fn upsert(
        &self,
        user_id: &str,
        name: Option<&str>,
        image: Option<&str>,
    ) -> Result<User, AppError>;
}

#[async_trait]
pub trait LibraryStore: Send + Sync {
    /// Append `{name, id}` to the user's `kind` list unless that id is already there.
    async fn add_entry(
        &self,
        user_id: &str,
        kind: LibraryKind,
        name: &str,
        entry_id: &str,
    ) -> Result<AddEntryOutcome, AppError>;

    /// `None` when the user does not exist.
    async fn list(&self, user_id: &str) -> Result<Option<UserLibrary>, AppError>;
}

#[async_trait]
pub trait CodeStore: Send + Sync {
    /// Fails with `AppError::Conflict` when the snippet is locked.
    async fn save(&self, request: &SaveCodeRequest) -> Result<CodeSnippet, AppError>;

    async fn get(&self, id: &str) -> Result<Option<CodeSnippet>, AppError>;
}

#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Fails with `AppError::Conflict` when the note is locked.
    async fn save(&self, request: &SaveNoteRequest) -> Result<Note, AppError>;

    async fn get(&self, id: &str) -> Result<Option<Note>, AppError>;
}
