//! Well-known locations inside an installation directory.

use std::path::Path;

/// Fixed names making up the install layout under `home` and `base`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallPath {
    /// The `bin` directory holding launch scripts and the marker archive
    BinDir,
    /// The `conf` directory (configuration root)
    ConfDir,
    /// The `lib` directory (default repository location)
    LibDir,
    /// The bootstrap property file inside `conf`
    PropertiesFile,
    /// Marker archive whose presence identifies a `bin` working directory
    MarkerArchive,
}

impl InstallPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BinDir => "bin",
            Self::ConfDir => "conf",
            Self::LibDir => "lib",
            Self::PropertiesFile => "catalina.properties",
            Self::MarkerArchive => "bootstrap.jar",
        }
    }
}

impl AsRef<Path> for InstallPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for InstallPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for InstallPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
