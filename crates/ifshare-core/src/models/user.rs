use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

use crate::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub name: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO sent after sign-in to register (or refresh) the user document
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpsertUserRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 255, message = "name must be at most 255 characters"))]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(length(max = 2048, message = "image must be at most 2048 characters"))]
    pub image: Option<String>,
}

/// Library owner id: the local part of the email with its first `.` and its
/// first `/` replaced by `_`. Clients compute the same id on their side.
pub fn derive_user_id(email: &str) -> Result<String, AppError> {
    let local = email.split('@').next().unwrap_or_default().trim();
    if local.is_empty() {
        return Err(AppError::InvalidInput(
            "email must have a non-empty local part".to_string(),
        ));
    }
    Ok(local.replacen('.', "_", 1).replacen('/', "_", 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_user_id_from_local_part() {
        assert_eq!(derive_user_id("jane.doe@example.com").unwrap(), "jane_doe");
        assert_eq!(derive_user_id("a.b.c/d@example.com").unwrap(), "a_b.c_d");
        assert_eq!(derive_user_id("john.q.doe@example.com").unwrap(), "john_q.doe");
        assert_eq!(derive_user_id("x/y/z@example.com").unwrap(), "x_y/z");
        assert_eq!(derive_user_id("plain@example.com").unwrap(), "plain");
    }

    #[test]
    fn rejects_empty_local_part() {
        assert!(derive_user_id("@example.com").is_err());
        assert!(derive_user_id("").is_err());
    }
}
