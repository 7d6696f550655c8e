//! Upload pipeline: validate, archive and encrypt, store, record, link.

mod service;
mod types;

pub use service::UploadOrchestrator;
pub use types::{IncomingFile, UploadOutcome, UploadPolicy, UploadStage};
