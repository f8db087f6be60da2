//! Normalized path handling for install directories and repository locations

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Configuration values and placeholder substitutions work on the string
/// form, so paths are kept as forward-slash strings and converted to
/// platform-native form only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes for internal storage.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: path_str.replace('\\', "/"),
        }
    }

    /// Resolve `path` to its canonical form.
    ///
    /// Falls back to the absolute (but unresolved) form when the path cannot
    /// be canonicalized, e.g. because it does not exist yet. An empty path
    /// names the working directory.
    pub fn canonical(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let path = if path.as_os_str().is_empty() {
            Path::new(".")
        } else {
            path
        };
        match dunce::canonicalize(path) {
            Ok(resolved) => Self::new(resolved),
            Err(e) => {
                tracing::debug!(?path, error = %e, "Cannot canonicalize, using absolute form");
                let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
                Self::new(absolute)
            }
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: impl AsRef<str>) -> Self {
        let segment = segment.as_ref().replace('\\', "/");
        let segment = segment.trim_start_matches('/');
        let joined = if self.inner.is_empty() {
            segment.to_string()
        } else if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment)
        } else {
            format!("{}/{}", self.inner, segment)
        };
        Self { inner: joined }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(idx) if idx > 0 => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 { None } else { Some(&name[idx + 1..]) }
        })
    }

    pub fn is_absolute(&self) -> bool {
        self.to_native().is_absolute()
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn canonical_resolves_parent_segments_of_existing_dirs() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("bin")).unwrap();

        let resolved = NormalizedPath::canonical(temp.path().join("bin").join(".."));
        let expected = NormalizedPath::canonical(temp.path());
        assert_eq!(resolved, expected);
    }

    #[test]
    fn canonical_falls_back_to_absolute_for_missing_paths() {
        let resolved = NormalizedPath::canonical("definitely-missing-dir/child");
        assert!(resolved.is_absolute());
        assert!(resolved.as_str().ends_with("definitely-missing-dir/child"));
    }

    #[test]
    fn canonical_empty_path_is_working_directory() {
        let resolved = NormalizedPath::canonical("");
        let expected = NormalizedPath::canonical(std::env::current_dir().unwrap());
        assert_eq!(resolved, expected);
        assert!(resolved.is_dir());
    }
}
