//! Storage key helpers shared by all backends.

use std::path::Path;

use ifshare_core::constants::{PUBLIC_KEY_PREFIX, PUBLIC_OBJECT_PATH_PREFIX};

const FALLBACK_FILE_NAME: &str = "file";

/// `public/<timestampMillis>_<name>`, with `name` reduced to its base name.
pub fn upload_storage_key(timestamp_millis: i64, file_name: &str) -> String {
    let name = Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .unwrap_or(FALLBACK_FILE_NAME);

    format!("{}/{}_{}", PUBLIC_KEY_PREFIX, timestamp_millis, name)
}

/// Path recorded in upload metadata for an object key.
pub fn public_object_path(storage_key: &str) -> String {
    format!("{}/{}", PUBLIC_OBJECT_PATH_PREFIX, storage_key)
}

/// Inverse of [`public_object_path`].
pub fn storage_key_from_object_path(object_path: &str) -> Option<&str> {
    object_path
        .strip_prefix(PUBLIC_OBJECT_PATH_PREFIX)
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|key| !key.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_timestamped_keys() {
        assert_eq!(
            upload_storage_key(1_700_000_000_123, "a.txt"),
            "public/1700000000123_a.txt"
        );
        assert_eq!(
            upload_storage_key(42, "files.zip"),
            "public/42_files.zip"
        );
    }

    #[test]
    fn strips_directories_from_names() {
        assert_eq!(upload_storage_key(1, "../../etc/passwd"), "public/1_passwd");
        assert_eq!(upload_storage_key(1, ".."), "public/1_file");
        assert_eq!(upload_storage_key(1, ""), "public/1_file");
    }

    #[test]
    fn object_path_round_trips() {
        let path = public_object_path("public/1_a.txt");
        assert_eq!(path, "/storage/v1/object/public/uploads/public/1_a.txt");
        assert_eq!(storage_key_from_object_path(&path), Some("public/1_a.txt"));
        assert_eq!(storage_key_from_object_path("/elsewhere/public/1_a.txt"), None);
    }
}
