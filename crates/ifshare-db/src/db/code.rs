use async_trait::async_trait;
use ifshare_core::models::{CodeSnippet, SaveCodeRequest};
use ifshare_core::AppError;
use sqlx::{PgPool, Postgres};

use crate::store::CodeStore;

#[derive(Clone)]
pub struct CodeRepository {
    pool: PgPool,
}

impl CodeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CodeStore for CodeRepository {
    #[tracing::instrument(skip(self, request), fields(db.table = "code_snippets", db.operation = "upsert", db.record_id = %request.id))]
    async fn save(&self, request: &SaveCodeRequest) -> Result<CodeSnippet, AppError> {
        let saved = sqlx::query_as::<Postgres, CodeSnippet>(
            r#"
            INSERT INTO code_snippets (id, value, language, theme)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET value = EXCLUDED.value,
                language = COALESCE(EXCLUDED.language, code_snippets.language),
                theme = COALESCE(EXCLUDED.theme, code_snippets.theme),
                updated_at = NOW()
            WHERE code_snippets.lock = FALSE
            RETURNING id, value, language, theme, lock, created_at, updated_at
            "#,
        )
        .bind(&request.id)
        .bind(&request.value)
        .bind(request.language.as_deref())
        .bind(request.theme.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        saved.ok_or_else(|| AppError::Conflict(format!("code {} is locked", request.id)))
    }

    #[tracing::instrument(skip(self), fields(db.table = "code_snippets", db.operation = "select", db.record_id = %id))]
    async fn get(&self, id: &str) -> Result<Option<CodeSnippet>, AppError> {
        let snippet = sqlx::query_as::<Postgres, CodeSnippet>(
            "SELECT id, value, language, theme, lock, created_at, updated_at FROM code_snippets WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(snippet)
    }
}
