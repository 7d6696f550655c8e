//! Database repositories
//!
//! One repository per table family. Every repository is a cheap `Clone` around
//! the shared `PgPool`.

mod code;
mod library;
mod note;
mod upload;
mod user;

pub use code::CodeRepository;
pub use library::LibraryRepository;
pub use note::NoteRepository;
pub use upload::UploadRepository;
pub use user::UserRepository;
