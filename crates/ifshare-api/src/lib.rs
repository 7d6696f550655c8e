//! IfShare API Library
//!
//! HTTP handlers, the upload orchestrator and application setup.

mod api_doc;
pub mod constants;
mod handlers;
mod telemetry;
mod utils;

pub mod error;
pub mod services;
pub mod setup;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
pub use services::upload::{UploadOrchestrator, UploadOutcome, UploadPolicy};
pub use state::AppState;
