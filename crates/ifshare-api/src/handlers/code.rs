use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::SnippetState;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use ifshare_core::models::{CodeSnippet, SaveCodeRequest, SnippetQuery};
use ifshare_db::CodeStore;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/code",
    tag = "snippets",
    request_body = SaveCodeRequest,
    responses(
        (status = 200, description = "Stored snippet", body = CodeSnippet),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 409, description = "Snippet is locked", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(snippets, request), fields(operation = "save_code", id = %request.id))]
pub async fn save_code(
    State(snippets): State<SnippetState>,
    ValidatedJson(request): ValidatedJson<SaveCodeRequest>,
) -> Result<Response, HttpAppError> {
    request.validate()?;
    let saved = snippets.codes.save(&request).await?;
    Ok(Json(saved).into_response())
}

#[utoipa::path(
    get,
    path = "/api/code",
    tag = "snippets",
    params(SnippetQuery),
    responses(
        (status = 200, description = "Snippet, or null when absent", body = Option<CodeSnippet>)
    )
)]
#[tracing::instrument(skip(snippets, query), fields(operation = "get_code", id = %query.id))]
pub async fn get_code(
    State(snippets): State<SnippetState>,
    Query(query): Query<SnippetQuery>,
) -> Result<Response, HttpAppError> {
    let snippet = snippets.codes.get(&query.id).await?;
    Ok(Json(snippet).into_response())
}
