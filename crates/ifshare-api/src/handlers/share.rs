use crate::error::{ErrorResponse, HttpAppError};
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use crate::state::ShareState;
use ifshare_core::{AppError, ShareKind, ShareLink};

#[utoipa::path(
    get,
    path = "/api/share/{kind}/{id}",
    tag = "share",
    params(
        ("kind" = String, Path, description = "One of file, code, notes"),
        ("id" = String, Path, description = "Public id")
    ),
    responses(
        (status = 200, description = "Share link and its QR code", body = ShareLink),
        (status = 400, description = "Unknown kind", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(share), fields(operation = "get_share_link"))]
pub async fn get_share_link(
    State(share): State<ShareState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Response, HttpAppError> {
    let kind: ShareKind = kind.parse()?;
    if id.trim().is_empty() {
        return Err(AppError::BadRequest("id must not be empty".to_string()).into());
    }

    let link = share.links.compose(kind, &id)?;
    Ok(Json(link).into_response())
}
