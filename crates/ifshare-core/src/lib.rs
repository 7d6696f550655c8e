//! IfShare Core Library
//!
//! Domain models, error types, configuration and the pure pieces of the upload
//! pipeline (encryption, archiving, public ids, share links) shared by the
//! storage, database and API crates.

pub mod archive;
pub mod config;
pub mod constants;
pub mod encryption;
pub mod error;
pub mod id;
pub mod models;
pub mod share;
pub mod storage_types;

// Re-export commonly used types
pub use archive::{archive_files, extract_archive, NamedBuffer};
pub use config::{BaseConfig, Config, ShareConfig};
pub use encryption::{EncryptedBlob, SharedSecretCipher};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use id::{generate_public_id, is_public_id};
pub use share::{ShareKind, ShareLink, ShareLinkComposer};
pub use storage_types::StorageBackend;
