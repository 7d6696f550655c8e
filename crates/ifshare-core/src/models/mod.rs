//! Data models for the application
//!
//! Grouped by feature area: uploads, the per-user library, users and snippets.

mod library;
mod snippet;
mod upload;
mod user;

pub use library::*;
pub use snippet::*;
pub use upload::*;
pub use user::*;
