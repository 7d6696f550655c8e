//! Shared constants

/// Prefix every uploaded object key starts with.
pub const PUBLIC_KEY_PREFIX: &str = "public";

/// Public path under which stored objects are addressed in the upload record.
pub const PUBLIC_OBJECT_PATH_PREFIX: &str = "/storage/v1/object/public/uploads";

/// Name of the archive produced when several files are uploaded together.
pub const ARCHIVE_FILE_NAME: &str = "files.zip";

pub const ARCHIVE_CONTENT_TYPE: &str = "application/zip";

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Length of public ids handed out in share links.
pub const PUBLIC_ID_LENGTH: usize = 6;

/// Attempts made to find an unused public id before giving up.
pub const PUBLIC_ID_MAX_ATTEMPTS: usize = 5;
