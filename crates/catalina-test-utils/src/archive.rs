//! Archive fixtures.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Write an archive at `path` holding `entries` as `(name, content)` pairs.
///
/// Entries are stored uncompressed. Missing parent directories are created.
///
/// # Panics
/// Panics if the archive cannot be written.
pub fn write_archive(path: &Path, entries: &[(&str, &str)]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("write_archive: failed to create {}: {e}", parent.display()));
    }
    let file = File::create(path)
        .unwrap_or_else(|e| panic!("write_archive: failed to create {}: {e}", path.display()));

    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, content) in entries {
        writer
            .start_file(*name, options)
            .unwrap_or_else(|e| panic!("write_archive: failed to start entry {name}: {e}"));
        writer
            .write_all(content.as_bytes())
            .unwrap_or_else(|e| panic!("write_archive: failed to write entry {name}: {e}"));
    }
    writer
        .finish()
        .unwrap_or_else(|e| panic!("write_archive: failed to finish {}: {e}", path.display()));
}
