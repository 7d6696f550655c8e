use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// One row per upload batch. Never updated after insert.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct UploadRecord {
    /// Public 6-character id used in share links
    pub id: String,
    pub file_name: String,
    /// Plaintext size in bytes (before encryption)
    pub file_size: i64,
    pub file_type: String,
    /// `/storage/v1/object/public/uploads/<storage key>`
    pub file_path: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUploadRecord {
    pub id: String,
    pub file_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub file_path: String,
}
