//! Domain route groups (files, library, snippets, share links).

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::routing::{get, post, put};
use axum::Router;
use std::sync::Arc;

pub fn file_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(&format!("{}/files", API_PREFIX), post(handlers::files::upload_files))
        .route(&format!("{}/files/{{id}}", API_PREFIX), get(handlers::files::get_file))
        .route(
            &format!("{}/files/{{id}}/content", API_PREFIX),
            get(handlers::files::download_file),
        )
}

pub fn library_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/store", API_PREFIX),
            post(handlers::store::add_library_entry).get(handlers::store::get_library),
        )
        .route(&format!("{}/users", API_PREFIX), put(handlers::users::upsert_user))
}

pub fn snippet_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/code", API_PREFIX),
            post(handlers::code::save_code).get(handlers::code::get_code),
        )
        .route(
            &format!("{}/notes", API_PREFIX),
            post(handlers::notes::save_note).get(handlers::notes::get_note),
        )
}

pub fn share_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        &format!("{}/share/{{kind}}/{{id}}", API_PREFIX),
        get(handlers::share::get_share_link),
    )
}
