//! Error types for catalina-fs

use std::path::PathBuf;

/// Result type for catalina-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in catalina-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Path does not exist: {path}")]
    NotFound { path: PathBuf },

    #[error("Expected a directory at {path}")]
    NotADirectory { path: PathBuf },

    #[error("Expected a regular file at {path}")]
    NotAFile { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The path the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. }
            | Self::NotFound { path }
            | Self::NotADirectory { path }
            | Self::NotAFile { path } => path,
        }
    }
}
