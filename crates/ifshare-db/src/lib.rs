//! IfShare database layer
//!
//! PostgreSQL repositories for upload metadata, users, libraries and snippets.
//! Each repository implements one of the store traits in [`store`] so callers
//! can swap in the in-memory implementations (feature `memory`) for tests.

pub mod db;
#[cfg(feature = "memory")]
pub mod memory;
pub mod store;

pub use db::{
    CodeRepository, LibraryRepository, NoteRepository, UploadRepository, UserRepository,
};
pub use store::{CodeStore, LibraryStore, NoteStore, UploadRecordStore, UserStore};
