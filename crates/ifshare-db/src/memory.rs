//! In-memory store implementations
//!
//! Same observable behavior as the Postgres repositories, backed by mutexed
//! collections. Used by the API test-suite.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use ifshare_core::models::{
    AddEntryOutcome, CodeSnippet, LibraryEntry, LibraryKind, NewUploadRecord, Note,
    SaveCodeRequest, SaveNoteRequest, UploadRecord, User, UserLibrary,
};
use ifshare_core::AppError;

use crate::store::{CodeStore, LibraryStore, NoteStore, UploadRecordStore, UserStore};

fn poisoned() -> AppError {
    AppError::Internal("in-memory store lock poisoned".to_string())
}

#[derive(Default)]
pub struct MemoryUploadStore {
    records: Mutex<HashMap<String, UploadRecord>>,
}

impl MemoryUploadStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UploadRecordStore for MemoryUploadStore {
    async fn insert(&self, record: NewUploadRecord) -> Result<UploadRecord, AppError> {
        let mut records = self.records.lock().map_err(|_| poisoned())?;
        if records.contains_key(&record.id) {
            return Err(AppError::Conflict(format!(
                "upload {} already exists",
                record.id
            )));
        }
        let stored = UploadRecord {
            id: record.id,
            file_name: record.file_name,
            file_size: record.file_size,
            file_type: record.file_type,
            file_path: record.file_path,
            created_at: Utc::now(),
        };
        records.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn get(&self, id: &str) -> Result<Option<UploadRecord>, AppError> {
        let records = self.records.lock().map_err(|_| poisoned())?;
        Ok(records.get(id).cloned())
    }

    async fn exists(&self, id: &str) -> Result<bool, AppError> {
        let records = self.records.lock().map_err(|_| poisoned())?;
        Ok(records.contains_key(id))
    }
}

/// Users and their libraries. Implements both [`UserStore`] and [`LibraryStore`]
/// so library adds see users registered through the same value.
#[derive(Default)]
pub struct MemoryLibraryStore {
    users: Mutex<HashMap<String, (User, UserLibrary)>>,
}

impl MemoryLibraryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryLibraryStore {
    async fn upsert(
        &self,
        user_id: &str,
        name: Option<&str>,
        image: Option<&str>,
    ) -> Result<User, AppError> {
        let mut users = self.users.lock().map_err(|_| poisoned())?;
        let now = Utc::now();
        let (user, _) = users.entry(user_id.to_string()).or_insert_with(|| {
            (
                User {
                    user_id: user_id.to_string(),
                    name: None,
                    image: None,
                    created_at: now,
                    updated_at: now,
                },
                UserLibrary::default(),
            )
        });
        if let Some(name) = name {
            user.name = Some(name.to_string());
        }
        if let Some(image) = image {
            user.image = Some(image.to_string());
        }
        user.updated_at = now;
        Ok(user.clone())
    }
}

#[async_trait]
impl LibraryStore for MemoryLibraryStore {
    async fn add_entry(
        &self,
        user_id: &str,
        kind: LibraryKind,
        name: &str,
        entry_id: &str,
    ) -> Result<AddEntryOutcome, AppError> {
        let mut users = self.users.lock().map_err(|_| poisoned())?;
        let Some((_, library)) = users.get_mut(user_id) else {
            return Ok(AddEntryOutcome::UserNotFound);
        };

        if library.entries(kind).iter().any(|e| e.id == entry_id) {
            return Ok(AddEntryOutcome::AlreadyAdded);
        }

        library.push(
            kind,
            LibraryEntry {
                name: name.to_string(),
                id: entry_id.to_string(),
                lock: false,
            },
        );
        Ok(AddEntryOutcome::Added)
    }

    async fn list(&self, user_id: &str) -> Result<Option<UserLibrary>, AppError> {
        let users = self.users.lock().map_err(|_| poisoned())?;
        Ok(users.get(user_id).map(|(_, library)| library.clone()))
    }
}

#[derive(Default)]
pub struct MemorySnippetStore {
    codes: Mutex<HashMap<String, CodeSnippet>>,
    notes: Mutex<HashMap<String, Note>>,
}

impl MemorySnippetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a stored code snippet read-only.
    pub fn lock_code(&self, id: &str) {
        if let Ok(mut codes) = self.codes.lock() {
            if let Some(code) = codes.get_mut(id) {
                code.lock = true;
            }
        }
    }
}

#[async_trait]
impl CodeStore for MemorySnippetStore {
    async fn save(&self, request: &SaveCodeRequest) -> Result<CodeSnippet, AppError> {
        let mut codes = self.codes.lock().map_err(|_| poisoned())?;
        let now = Utc::now();
        match codes.get_mut(&request.id) {
            Some(existing) if existing.lock => Err(AppError::Conflict(format!(
                "code {} is locked",
                request.id
            ))),
            Some(existing) => {
                existing.value = request.value.clone();
                if request.language.is_some() {
                    existing.language = request.language.clone();
                }
                if request.theme.is_some() {
                    existing.theme = request.theme.clone();
                }
                existing.updated_at = now;
                Ok(existing.clone())
            }
            None => {
                let snippet = CodeSnippet {
                    id: request.id.clone(),
                    value: request.value.clone(),
                    language: request.language.clone(),
                    theme: request.theme.clone(),
                    lock: false,
                    created_at: now,
                    updated_at: now,
                };
                codes.insert(snippet.id.clone(), snippet.clone());
                Ok(snippet)
            }
        }
    }

    async fn get(&self, id: &str) -> Result<Option<CodeSnippet>, AppError> {
        let codes = self.codes.lock().map_err(|_| poisoned())?;
        Ok(codes.get(id).cloned())
    }
}

#[async_trait]
impl NoteStore for MemorySnippetStore {
    async fn save(&self, request: &SaveNoteRequest) -> Result<Note, AppError> {
        let mut notes = self.notes.lock().map_err(|_| poisoned())?;
        let now = Utc::now();
        match notes.get_mut(&request.id) {
            Some(existing) if existing.lock => Err(AppError::Conflict(format!(
                "note {} is locked",
                request.id
            ))),
            Some(existing) => {
                existing.value = request.value.clone();
                existing.updated_at = now;
                Ok(existing.clone())
            }
            None => {
                let note = Note {
                    id: request.id.clone(),
                    value: request.value.clone(),
                    lock: false,
                    created_at: now,
                    updated_at: now,
                };
                notes.insert(note.id.clone(), note.clone());
                Ok(note)
            }
        }
    }

    async fn get(&self, id: &str) -> Result<Option<Note>, AppError> {
        let notes = self.notes.lock().map_err(|_| poisoned())?;
        Ok(notes.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn library_add_is_insert_if_absent() {
        let store = MemoryLibraryStore::new();
        assert_eq!(
            store
                .add_entry("jane", LibraryKind::Codes, "snippet", "abc123")
                .await
                .unwrap(),
            AddEntryOutcome::UserNotFound
        );
        assert!(store.list("jane").await.unwrap().is_none());

        store.upsert("jane", Some("Jane"), None).await.unwrap();
        assert_eq!(
            store
                .add_entry("jane", LibraryKind::Codes, "snippet", "abc123")
                .await
                .unwrap(),
            AddEntryOutcome::Added
        );
        assert_eq!(
            store
                .add_entry("jane", LibraryKind::Codes, "renamed", "abc123")
                .await
                .unwrap(),
            AddEntryOutcome::AlreadyAdded
        );
        // Same id under another kind is a separate entry
        assert_eq!(
            store
                .add_entry("jane", LibraryKind::Notes, "note", "abc123")
                .await
                .unwrap(),
            AddEntryOutcome::Added
        );

        let library = store.list("jane").await.unwrap().unwrap();
        assert_eq!(library.codes.len(), 1);
        assert_eq!(library.codes[0].name, "snippet");
        assert_eq!(library.notes.len(), 1);
        assert!(library.files.is_empty());
    }

    #[tokio::test]
    async fn locked_code_rejects_saves() {
        let store = MemorySnippetStore::new();
        let request = SaveCodeRequest {
            id: "abc123".to_string(),
            value: "print(1)".to_string(),
            language: Some("python".to_string()),
            theme: None,
        };
        CodeStore::save(&store, &request).await.unwrap();
        store.lock_code("abc123");

        let err = CodeStore::save(&store, &request).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
