use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::AppError;

/// Which list of a user's library an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "library_kind", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum LibraryKind {
    Files,
    Codes,
    Notes,
}

impl FromStr for LibraryKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "files" => Ok(LibraryKind::Files),
            "codes" => Ok(LibraryKind::Codes),
            "notes" => Ok(LibraryKind::Notes),
            other => Err(AppError::BadRequest(format!(
                "Unknown library type '{}', expected files, codes or notes",
                other
            ))),
        }
    }
}

impl fmt::Display for LibraryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryKind::Files => f.write_str("files"),
            LibraryKind::Codes => f.write_str("codes"),
            LibraryKind::Notes => f.write_str("notes"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LibraryEntry {
    pub name: String,
    pub id: String,
    #[serde(default)]
    pub lock: bool,
}

/// The three lists of a user's library, each in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserLibrary {
    pub files: Vec<LibraryEntry>,
    pub codes: Vec<LibraryEntry>,
    pub notes: Vec<LibraryEntry>,
}

impl UserLibrary {
    pub fn entries(&self, kind: LibraryKind) -> &[LibraryEntry] {
        match kind {
            LibraryKind::Files => &self.files,
            LibraryKind::Codes => &self.codes,
            LibraryKind::Notes => &self.notes,
        }
    }

    pub fn push(&mut self, kind: LibraryKind, entry: LibraryEntry) {
        match kind {
            LibraryKind::Files => self.files.push(entry),
            LibraryKind::Codes => self.codes.push(entry),
            LibraryKind::Notes => self.notes.push(entry),
        }
    }
}

/// Result of adding an entry to a library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddEntryOutcome {
    Added,
    AlreadyAdded,
    UserNotFound,
}

impl AddEntryOutcome {
    /// Plain-text body returned to clients
    pub fn message(&self) -> &'static str {
        match self {
            AddEntryOutcome::Added => "done",
            AddEntryOutcome::AlreadyAdded => "Already added",
            AddEntryOutcome::UserNotFound => "user not found",
        }
    }
}

/// Request DTO for `POST /api/store`
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddLibraryEntryRequest {
    #[validate(length(min = 1, max = 255, message = "userId must be between 1 and 255 characters"))]
    pub user_id: String,
    #[validate(length(min = 1, max = 255, message = "name must be between 1 and 255 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 64, message = "id must be between 1 and 64 characters"))]
    pub id: String,
    /// One of `files`, `codes`, `notes`
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LibraryQuery {
    pub user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parsing_is_exact() {
        assert_eq!("codes".parse::<LibraryKind>().unwrap(), LibraryKind::Codes);
        assert!("code".parse::<LibraryKind>().is_err());
        assert!("Files".parse::<LibraryKind>().is_err());
    }

    #[test]
    fn outcome_messages() {
        assert_eq!(AddEntryOutcome::Added.message(), "done");
        assert_eq!(AddEntryOutcome::AlreadyAdded.message(), "Already added");
        assert_eq!(AddEntryOutcome::UserNotFound.message(), "user not found");
    }

    #[test]
    fn request_uses_client_field_names() {
        let req: AddLibraryEntryRequest = serde_json::from_str(
            r#"{"userId":"jane_doe","name":"snippet","id":"aZ09xY","type":"codes"}"#,
        )
        .unwrap();
        assert_eq!(req.user_id, "jane_doe");
        assert_eq!(req.kind, "codes");
    }

    #[test]
    fn library_serializes_as_three_lists() {
        let mut library = UserLibrary::default();
        library.push(
            LibraryKind::Notes,
            LibraryEntry {
                name: "todo".into(),
                id: "n1".into(),
                lock: false,
            },
        );
        let json = serde_json::to_value(&library).unwrap();
        assert_eq!(json["files"], serde_json::json!([]));
        assert_eq!(
            json["notes"],
            serde_json::json!([{"name": "todo", "id": "n1", "lock": false}])
        );
        assert_eq!(library.entries(LibraryKind::Notes).len(), 1);
    }
}
