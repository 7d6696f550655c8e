use async_trait::async_trait;
use ifshare_core::models::{NewUploadRecord, UploadRecord};
use ifshare_core::AppError;
use sqlx::{PgPool, Postgres};

use crate::store::UploadRecordStore;

/// Repository for upload metadata records
#[derive(Clone)]
pub struct UploadRepository {
    pool: PgPool,
}

impl UploadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UploadRecordStore for UploadRepository {
    #[tracing::instrument(skip(self, record), fields(db.table = "uploads", db.operation = "insert", db.record_id = %record.id))]
    async fn insert(&self, record: NewUploadRecord) -> Result<UploadRecord, AppError> {
        let row = sqlx::query_as::<Postgres, UploadRecord>(
            r#"
            INSERT INTO uploads (id, file_name, file_size, file_type, file_path)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, file_name, file_size, file_type, file_path, created_at
            "#,
        )
        .bind(&record.id)
        .bind(&record.file_name)
        .bind(record.file_size)
        .bind(&record.file_type)
        .bind(&record.file_path)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "uploads", db.operation = "select", db.record_id = %id))]
    async fn get(&self, id: &str) -> Result<Option<UploadRecord>, AppError> {
        let row = sqlx::query_as::<Postgres, UploadRecord>(
            "SELECT id, file_name, file_size, file_type, file_path, created_at FROM uploads WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "uploads", db.operation = "select"))]
    async fn exists(&self, id: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM uploads WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
