//! Error types for catalina-core

use std::path::PathBuf;

use crate::bootstrap::BootstrapState;

/// Result type for catalina-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while assembling the loading environment
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No configuration origin could be opened or parsed.
    ///
    /// Only ever logged; loading degrades to an empty configuration.
    #[error("Configuration unavailable: {reason}")]
    ConfigUnavailable { reason: String },

    /// Property file content could not be parsed
    #[error("Malformed property data at line {line}: {message}")]
    PropertyParse { line: usize, message: String },

    /// A repository list contains a double quote outside a quoted path
    #[error(
        "The double quote [\"] character may only be used to quote paths. \
         It must not appear in a path. This repository list is not valid: [{value}]"
    )]
    MalformedPathList { value: String },

    /// A classified repository does not exist or cannot be read
    #[error("Failed to create loading scope '{layer}' from [{location}]: {reason}")]
    ScopeConstructionFailed {
        layer: String,
        location: String,
        reason: String,
    },

    /// Archive could not be read
    #[error("Archive error at {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// A bootstrap step was invoked out of order
    #[error("Invalid bootstrap state: expected {expected}, found {actual}")]
    InvalidState {
        expected: BootstrapState,
        actual: BootstrapState,
    },

    /// The host failed one of its lifecycle steps
    #[error("Host {phase} failed: {message}")]
    Host { phase: String, message: String },

    /// Filesystem error from catalina-fs
    #[error(transparent)]
    Fs(#[from] catalina_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn host(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Host {
            phase: phase.into(),
            message: message.into(),
        }
    }

    /// Whether bootstrap must terminate on this error.
    ///
    /// Everything except an unavailable configuration is fatal.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::ConfigUnavailable { .. })
    }
}
