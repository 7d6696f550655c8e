//! IfShare Storage Library
//!
//! Object storage for encrypted uploads, behind the `Storage` trait, with
//! local filesystem and S3-compatible implementations.
//!
//! # Storage key format
//!
//! Every upload lands under `public/<timestampMillis>_<file name>`; batches of
//! several files land under `public/<timestampMillis>_files.zip`. Key
//! generation lives in the `keys` module so all backends agree.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use ifshare_core::StorageBackend;
pub use keys::{public_object_path, storage_key_from_object_path, upload_storage_key};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
