//! Per-user library of files, code snippets and notes

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::LibraryState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ifshare_core::models::{
    AddEntryOutcome, AddLibraryEntryRequest, LibraryKind, LibraryQuery, UserLibrary,
};
use ifshare_db::LibraryStore;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/store",
    tag = "library",
    request_body = AddLibraryEntryRequest,
    responses(
        (status = 200, description = "`done`, or `Already added` when the id is already listed", body = String, content_type = "text/plain"),
        (status = 400, description = "Unknown type or invalid body", body = ErrorResponse),
        (status = 404, description = "`user not found`", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(library, request),
    fields(operation = "add_library_entry", user_id = %request.user_id, kind = %request.kind)
)]
pub async fn add_library_entry(
    State(library): State<LibraryState>,
    ValidatedJson(request): ValidatedJson<AddLibraryEntryRequest>,
) -> Result<Response, HttpAppError> {
    request.validate()?;
    let kind: LibraryKind = request.kind.parse()?;

    let outcome = library
        .library
        .add_entry(&request.user_id, kind, &request.name, &request.id)
        .await?;

    let status = match outcome {
        AddEntryOutcome::UserNotFound => StatusCode::NOT_FOUND,
        AddEntryOutcome::Added | AddEntryOutcome::AlreadyAdded => StatusCode::OK,
    };
    tracing::debug!(outcome = outcome.message(), "Library add handled");

    Ok((status, outcome.message()).into_response())
}

#[utoipa::path(
    get,
    path = "/api/store",
    tag = "library",
    params(LibraryQuery),
    responses(
        (status = 200, description = "The user's library", body = UserLibrary),
        (status = 404, description = "`user not found`", body = String, content_type = "text/plain")
    )
)]
#[tracing::instrument(skip(library, query), fields(operation = "get_library", user_id = %query.user_id))]
pub async fn get_library(
    State(library): State<LibraryState>,
    Query(query): Query<LibraryQuery>,
) -> Result<Response, HttpAppError> {
    match library.library.list(&query.user_id).await? {
        Some(lists) => Ok(Json(lists).into_response()),
        None => Ok((
            StatusCode::NOT_FOUND,
            AddEntryOutcome::UserNotFound.message(),
        )
            .into_response()),
    }
}
