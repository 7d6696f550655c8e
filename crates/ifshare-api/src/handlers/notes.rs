use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::SnippetState;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use ifshare_core::models::{Note, SaveNoteRequest, SnippetQuery};
use ifshare_db::NoteStore;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/notes",
    tag = "snippets",
    request_body = SaveNoteRequest,
    responses(
        (status = 200, description = "Stored note", body = Note),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 409, description = "Note is locked", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(snippets, request), fields(operation = "save_note", id = %request.id))]
pub async fn save_note(
    State(snippets): State<SnippetState>,
    ValidatedJson(request): ValidatedJson<SaveNoteRequest>,
) -> Result<Response, HttpAppError> {
    request.validate()?;
    let saved = snippets.notes.save(&request).await?;
    Ok(Json(saved).into_response())
}

#[utoipa::path(
    get,
    path = "/api/notes",
    tag = "snippets",
    params(SnippetQuery),
    responses(
        (status = 200, description = "Note, or null when absent", body = Option<Note>)
    )
)]
#[tracing::instrument(skip(snippets, query), fields(operation = "get_note", id = %query.id))]
pub async fn get_note(
    State(snippets): State<SnippetState>,
    Query(query): Query<SnippetQuery>,
) -> Result<Response, HttpAppError> {
    let note = snippets.notes.get(&query.id).await?;
    Ok(Json(note).into_response())
}
