//! Classification of repository paths

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// Suffix marking a single archive repository.
pub const ARCHIVE_SUFFIX: &str = ".jar";

/// Suffix marking every archive in a directory.
pub const ARCHIVE_SET_SUFFIX: &str = "*.jar";

/// URL schemes accepted as remote locators.
const LOCATOR_SCHEMES: &[&str] = &["file", "jar", "http", "https", "ftp"];

/// Schemes that name a resource without a host component.
const HOSTLESS_SCHEMES: &[&str] = &["file", "jar"];

/// The kind of a configured repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepositoryKind {
    /// Absolute URL with a recognized scheme
    RemoteLocator,
    /// A single archive file
    Archive,
    /// Every archive directly inside a directory
    ArchiveSet,
    /// A loose tree of individually addressable resources
    Directory,
}

impl fmt::Display for RepositoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RemoteLocator => "remote-locator",
            Self::Archive => "archive",
            Self::ArchiveSet => "archive-set",
            Self::Directory => "directory",
        };
        f.write_str(name)
    }
}

/// One classified entry of a repository list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryEntry {
    location: String,
    kind: RepositoryKind,
}

impl RepositoryEntry {
    pub fn new(location: impl Into<String>, kind: RepositoryKind) -> Self {
        Self {
            location: location.into(),
            kind,
        }
    }

    /// Classify a single path from a repository list.
    ///
    /// Tested in order: remote locator, `*.jar` archive set (suffix
    /// stripped), `.jar` archive, directory.
    pub fn classify(path: &str) -> Self {
        if as_locator(path).is_some() {
            return Self::new(path, RepositoryKind::RemoteLocator);
        }
        if let Some(dir) = path.strip_suffix(ARCHIVE_SET_SUFFIX) {
            return Self::new(dir, RepositoryKind::ArchiveSet);
        }
        if path.ends_with(ARCHIVE_SUFFIX) {
            return Self::new(path, RepositoryKind::Archive);
        }
        Self::new(path, RepositoryKind::Directory)
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn kind(&self) -> RepositoryKind {
        self.kind
    }
}

impl fmt::Display for RepositoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.location, self.kind)
    }
}

/// Parse `path` as a remote locator URL, if it is one.
pub(crate) fn as_locator(path: &str) -> Option<Url> {
    let url = Url::parse(path).ok()?;
    let scheme = url.scheme();
    if !LOCATOR_SCHEMES.contains(&scheme) {
        return None;
    }
    if !url.has_host() && !HOSTLESS_SCHEMES.contains(&scheme) {
        return None;
    }
    Some(url)
}
