use async_trait::async_trait;
use ifshare_core::models::{AddEntryOutcome, LibraryEntry, LibraryKind, UserLibrary};
use ifshare_core::AppError;
use sqlx::{FromRow, PgPool, Postgres};

use crate::store::LibraryStore;

#[derive(FromRow)]
struct LibraryEntryRow {
    kind: LibraryKind,
    entry_id: String,
    name: String,
    lock: bool,
}

/// Repository for per-user library entries
#[derive(Clone)]
pub struct LibraryRepository {
    pool: PgPool,
}

impl LibraryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LibraryStore for LibraryRepository {
    #[tracing::instrument(skip(self), fields(db.table = "library_entries", db.operation = "insert"))]
    async fn add_entry(
        &self,
        user_id: &str,
        kind: LibraryKind,
        name: &str,
        entry_id: &str,
    ) -> Result<AddEntryOutcome, AppError> {
        // Owner check and insert-if-absent in one statement
        let (user_exists, inserted) = sqlx::query_as::<Postgres, (bool, bool)>(
            r#"
            WITH owner AS (
                SELECT user_id FROM users WHERE user_id = $1
            ), inserted AS (
                INSERT INTO library_entries (user_id, kind, entry_id, name)
                SELECT user_id, $2, $3, $4 FROM owner
                ON CONFLICT ON CONSTRAINT library_entries_unique_entry DO NOTHING
                RETURNING position
            )
            SELECT EXISTS(SELECT 1 FROM owner), EXISTS(SELECT 1 FROM inserted)
            "#,
        )
        .bind(user_id)
        .bind(kind)
        .bind(entry_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(match (user_exists, inserted) {
            (false, _) => AddEntryOutcome::UserNotFound,
            (true, true) => AddEntryOutcome::Added,
            (true, false) => AddEntryOutcome::AlreadyAdded,
        })
    }

    #[tracing::instrument(skip(self), fields(db.table = "library_entries", db.operation = "select"))]
    async fn list(&self, user_id: &str) -> Result<Option<UserLibrary>, AppError> {
        let user_exists = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE user_id = $1)",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        if !user_exists {
            return Ok(None);
        }

        let rows = sqlx::query_as::<Postgres, LibraryEntryRow>(
            r#"
            SELECT kind, entry_id, name, lock
            FROM library_entries
            WHERE user_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut library = UserLibrary::default();
        for row in rows {
            library.push(
                row.kind,
                LibraryEntry {
                    name: row.name,
                    id: row.entry_id,
                    lock: row.lock,
                },
            );
        }

        Ok(Some(library))
    }
}
