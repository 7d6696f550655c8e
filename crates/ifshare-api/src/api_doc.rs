//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use crate::services::upload::UploadOutcome;
use ifshare_core::models;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "IfShare API",
        version = "0.1.0",
        description = "Encrypted file sharing with short public links, plus code and note snippets and a per-user library."
    ),
    paths(
        // Files
        handlers::files::upload_files,
        handlers::files::get_file,
        handlers::files::download_file,
        // Library
        handlers::store::add_library_entry,
        handlers::store::get_library,
        handlers::users::upsert_user,
        // Snippets
        handlers::code::save_code,
        handlers::code::get_code,
        handlers::notes::save_note,
        handlers::notes::get_note,
        // Share links
        handlers::share::get_share_link,
    ),
    components(
        schemas(
            UploadOutcome,
            handlers::files::FileResponse,
            models::UploadRecord,
            models::LibraryKind,
            models::LibraryEntry,
            models::UserLibrary,
            models::AddLibraryEntryRequest,
            models::User,
            models::UpsertUserRequest,
            models::CodeSnippet,
            models::SaveCodeRequest,
            models::Note,
            models::SaveNoteRequest,
            ifshare_core::ShareKind,
            ifshare_core::ShareLink,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "files", description = "Encrypted upload batches"),
        (name = "library", description = "Per-user saved files, codes and notes"),
        (name = "users", description = "User registry"),
        (name = "snippets", description = "Code and notes documents"),
        (name = "share", description = "Public links and QR codes")
    )
)]
pub struct ApiDoc;
