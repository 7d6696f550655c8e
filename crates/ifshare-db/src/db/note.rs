use async_trait::async_trait;
use ifshare_core::models::{Note, SaveNoteRequest};
use ifshare_core::AppError;
use sqlx::{PgPool, Postgres};

use crate::store::NoteStore;

#[derive(Clone)]
pub struct NoteRepository {
    pool: PgPool,
}

impl NoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteStore for NoteRepository {
    #[tracing::instrument(skip(self, request), fields(db.table = "notes", db.operation = "upsert", db.record_id = %request.id))]
    async fn save(&self, request: &SaveNoteRequest) -> Result<Note, AppError> {
        let saved = sqlx::query_as::<Postgres, Note>(
            r#"
            INSERT INTO notes (id, value)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE
            SET value = EXCLUDED.value,
                updated_at = NOW()
            WHERE notes.lock = FALSE
            RETURNING id, value, lock, created_at, updated_at
            "#,
        )
        .bind(&request.id)
        .bind(&request.value)
        .fetch_optional(&self.pool)
        .await?;

        saved.ok_or_else(|| AppError::Conflict(format!("note {} is locked", request.id)))
    }

    #[tracing::instrument(skip(self), fields(db.table = "notes", db.operation = "select", db.record_id = %id))]
    async fn get(&self, id: &str) -> Result<Option<Note>, AppError> {
        let note = sqlx::query_as::<Postgres, Note>(
            "SELECT id, value, lock, created_at, updated_at FROM notes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(note)
    }
}
