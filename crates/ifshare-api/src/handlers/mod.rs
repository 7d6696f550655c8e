pub mod code;
pub mod files;
pub mod notes;
pub mod share;
pub mod store;
pub mod users;
