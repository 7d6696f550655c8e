use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct CodeSnippet {
    pub id: String,
    pub value: String,
    pub language: Option<String>,
    pub theme: Option<String>,
    /// Read-only flag; locked snippets reject further saves
    pub lock: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct Note {
    pub id: String,
    pub value: String,
    pub lock: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct SaveCodeRequest {
    #[validate(length(min = 1, max = 64, message = "id must be between 1 and 64 characters"))]
    pub id: String,
    #[validate(length(max = 1048576, message = "value is too large"))]
    pub value: String,
    #[serde(default)]
    #[validate(length(max = 64))]
    pub language: Option<String>,
    #[serde(default)]
    #[validate(length(max = 64))]
    pub theme: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct SaveNoteRequest {
    #[validate(length(min = 1, max = 64, message = "id must be between 1 and 64 characters"))]
    pub id: String,
    #[validate(length(max = 1048576, message = "value is too large"))]
    pub value: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SnippetQuery {
    pub id: String,
}
