use async_trait::async_trait;
use ifshare_core::models::User;
use ifshare_core::AppError;
use sqlx::{PgPool, Postgres};

use crate::store::UserStore;

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    #[tracing::instrument(skip(self, image), fields(db.table = "users", db.operation = "upsert"))]
    async fn upsert(
        &self,
        user_id: &str,
        name: Option<&str>,
        image: Option<&str>,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<Postgres, User>(
            r#"
            INSERT INTO users (user_id, name, image)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE
            SET name = COALESCE(EXCLUDED.name, users.name),
                image = COALESCE(EXCLUDED.image, users.image),
                updated_at = NOW()
            RETURNING user_id, name, image, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(image)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }
}
