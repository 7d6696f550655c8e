//! API constants

/// API base path prefix
pub const API_PREFIX: &str = "/api";

/// Multipart field carrying uploaded files
pub const UPLOAD_FIELD_NAME: &str = "file";

/// Key looked up by the health check; it never exists.
pub const HEALTH_CHECK_STORAGE_KEY: &str = "health-check-non-existent-key";
