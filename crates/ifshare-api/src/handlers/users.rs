use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::LibraryState;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use ifshare_core::models::{derive_user_id, UpsertUserRequest, User};
use ifshare_db::UserStore;
use validator::Validate;

/// Register the signed-in user so library writes have an owner.
#[utoipa::path(
    put,
    path = "/api/users",
    tag = "users",
    request_body = UpsertUserRequest,
    responses(
        (status = 200, description = "User document", body = User),
        (status = 400, description = "Invalid email", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(library, request), fields(operation = "upsert_user"))]
pub async fn upsert_user(
    State(library): State<LibraryState>,
    ValidatedJson(request): ValidatedJson<UpsertUserRequest>,
) -> Result<Response, HttpAppError> {
    request.validate()?;
    let user_id = derive_user_id(&request.email)?;

    let user = library
        .users
        .upsert(&user_id, request.name.as_deref(), request.image.as_deref())
        .await?;

    tracing::info!(user_id = %user.user_id, "User registered");
    Ok(Json(user).into_response())
}
