//! Read-side I/O helpers used while probing configuration and repositories

use std::fs;
use std::path::PathBuf;

use crate::{Error, NormalizedPath, Result};

/// Read raw bytes from a file.
pub fn read_bytes(path: &NormalizedPath) -> Result<Vec<u8>> {
    let native_path = path.to_native();
    fs::read(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Read a text file, tolerating non-UTF-8 content.
///
/// See [`decode_lenient`].
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    read_bytes(path).map(|bytes| decode_lenient(&bytes))
}

/// Decode bytes as UTF-8, falling back to ISO-8859-1 when they are not
/// valid UTF-8.
///
/// Every byte maps to exactly one char in the fallback, so decoding never
/// fails.
pub fn decode_lenient(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

/// Ensure `path` is an existing, listable directory.
pub fn ensure_readable_dir(path: &NormalizedPath) -> Result<()> {
    let native_path = path.to_native();
    if !native_path.exists() {
        return Err(Error::NotFound { path: native_path });
    }
    if !native_path.is_dir() {
        return Err(Error::NotADirectory { path: native_path });
    }
    fs::read_dir(&native_path).map_err(|e| Error::io(&native_path, e))?;
    Ok(())
}

/// Ensure `path` is an existing regular file.
pub fn ensure_file(path: &NormalizedPath) -> Result<()> {
    let native_path = path.to_native();
    if !native_path.exists() {
        return Err(Error::NotFound { path: native_path });
    }
    if !native_path.is_file() {
        return Err(Error::NotAFile { path: native_path });
    }
    Ok(())
}

/// List the regular files directly inside `dir` whose names end with
/// `suffix` (ASCII case-insensitive), sorted by file name.
pub fn list_files_with_suffix(dir: &NormalizedPath, suffix: &str) -> Result<Vec<NormalizedPath>> {
    ensure_readable_dir(dir)?;
    let native_dir = dir.to_native();
    let suffix = suffix.to_ascii_lowercase();

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(&native_dir).map_err(|e| Error::io(&native_dir, e))? {
        let entry = entry.map_err(|e| Error::io(&native_dir, e))?;
        let path = entry.path();
        let matches = path
            .file_name()
            .map(|name| name.to_string_lossy().to_ascii_lowercase().ends_with(&suffix))
            .unwrap_or(false);
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    tracing::trace!(dir = %dir, count = files.len(), "Listed files with suffix {}", suffix);
    Ok(files.into_iter().map(NormalizedPath::from).collect())
}
