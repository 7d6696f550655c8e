//! ZIP bundling for multi-file uploads

use std::collections::HashSet;
use std::io::{Cursor, Read, Write};
use std::path::Path;

use zip::write::{FileOptions, ZipWriter};
use zip::{CompressionMethod, ZipArchive};

use crate::AppError;

/// A file held in memory together with the name it was uploaded under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedBuffer {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl NamedBuffer {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Strip path components so entries cannot escape the extraction directory.
fn sanitize_entry_name(filename: &str, fallback: &str) -> String {
    Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .unwrap_or(fallback)
        .to_string()
}

/// `a.txt` -> `a (1).txt`, `README` -> `README (1)`
fn numbered_name(name: &str, n: usize) -> String {
    match name.rfind('.') {
        Some(dot) if dot > 0 => format!("{} ({}){}", &name[..dot], n, &name[dot..]),
        _ => format!("{} ({})", name, n),
    }
}

fn unique_entry_name(name: String, taken: &mut HashSet<String>) -> String {
    if taken.insert(name.clone()) {
        return name;
    }
    let mut n = 1;
    loop {
        let candidate = numbered_name(&name, n);
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// Bundle the buffers into a Deflate-compressed ZIP, one entry per buffer, in order.
pub fn archive_files(files: &[NamedBuffer]) -> Result<Vec<u8>, AppError> {
    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);

        let mut taken = HashSet::new();
        for (index, file) in files.iter().enumerate() {
            let fallback = format!("file-{}", index + 1);
            let entry_name = unique_entry_name(sanitize_entry_name(&file.name, &fallback), &mut taken);

            zip.start_file(entry_name.as_str(), options)?;
            zip.write_all(&file.bytes)?;
        }

        zip.finish()?;
    }

    tracing::debug!(
        entries = files.len(),
        archive_size_bytes = buffer.len(),
        "Built upload archive"
    );

    Ok(buffer)
}

const MAX_PREALLOCATED_ENTRY_BYTES: u64 = 1024 * 1024;

/// Initial buffer size for an entry. The declared size comes from the archive
/// header and is not trusted beyond `MAX_PREALLOCATED_ENTRY_BYTES`.
fn preallocation_hint(declared: u64) -> usize {
    declared.min(MAX_PREALLOCATED_ENTRY_BYTES) as usize
}

/// Read every file entry of a ZIP back into memory.
pub fn extract_archive(bytes: &[u8]) -> Result<Vec<NamedBuffer>, AppError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut entries = Vec::with_capacity(archive.len());

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }
        let mut contents = Vec::with_capacity(preallocation_hint(entry.size()));
        entry.read_to_end(&mut contents)?;
        entries.push(NamedBuffer::new(entry.name(), contents));
    }

    Ok(entries)
}
