//! Loading scopes: isolated resource resolution with parent delegation

use std::collections::BTreeSet;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::sync::Arc;

use catalina_fs::{NormalizedPath, io};
use url::Url;
use zip::ZipArchive;
use zip::result::ZipError;

use super::RepositoryEntry;
use crate::config::DEFAULT_PROPERTIES;
use crate::{Error, Result};

/// Name of the root scope provided by the embedding environment.
pub const EMBEDDED_SCOPE: &str = "embedded";

/// Resources bundled with the embedding environment itself.
const EMBEDDED_RESOURCES: &[(&str, &str)] = &[("conf/catalina.properties", DEFAULT_PROPERTIES)];

/// A resolved resource and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    name: String,
    scope: String,
    origin: String,
    bytes: Vec<u8>,
}

impl Resource {
    /// The normalized resource name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the scope whose repository served the resource.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// The directory, archive or table that held the resource.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// An archive opened for lookups.
///
/// The entry index is read once when the archive is opened; content is read
/// on demand.
#[derive(Debug, Clone)]
pub struct ArchiveRepository {
    path: NormalizedPath,
    entries: BTreeSet<String>,
}

impl ArchiveRepository {
    /// Open `path` and index its entries.
    pub fn open(path: NormalizedPath) -> Result<Self> {
        io::ensure_file(&path)?;
        let native = path.to_native();
        let file = File::open(&native).map_err(|e| catalina_fs::Error::io(&native, e))?;
        let archive = ZipArchive::new(file).map_err(|source| Error::Archive {
            path: native.clone(),
            source,
        })?;
        let entries = archive.file_names().map(str::to_string).collect();
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        if !self.contains(name) {
            return Ok(None);
        }
        let native = self.path.to_native();
        let archive_error = |source| Error::Archive {
            path: native.clone(),
            source,
        };

        let file = File::open(&native).map_err(|e| catalina_fs::Error::io(&native, e))?;
        let mut archive = ZipArchive::new(file).map_err(archive_error)?;
        let mut entry = match archive.by_name(name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(archive_error(e)),
        };
        let mut bytes = Vec::new();
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| catalina_fs::Error::io(&native, e))?;
        Ok(Some(bytes))
    }
}

/// An opened repository backing a [`LoadingScope`].
#[derive(Debug, Clone)]
pub enum Repository {
    /// Resources are files below `root`
    Directory { root: NormalizedPath },
    /// Resources are entries of a single archive
    Archive(ArchiveRepository),
    /// Non-local locator; recorded but never resolved during bootstrap
    Remote { url: Url },
    /// Resources compiled into the binary
    Embedded {
        resources: &'static [(&'static str, &'static str)],
    },
}

impl Repository {
    fn origin(&self) -> String {
        match self {
            Self::Directory { root } => root.to_string(),
            Self::Archive(archive) => archive.path().to_string(),
            Self::Remote { url } => url.to_string(),
            Self::Embedded { .. } => format!("<{EMBEDDED_SCOPE}>"),
        }
    }

    fn read(&self, name: &str) -> Result<Option<Vec<u8>>> {
        match self {
            Self::Directory { root } => {
                let candidate = root.join(name);
                if candidate.is_file() {
                    Ok(Some(io::read_bytes(&candidate)?))
                } else {
                    Ok(None)
                }
            }
            Self::Archive(archive) => archive.read(name),
            Self::Remote { url } => {
                tracing::trace!(%url, resource = name, "Remote repositories are not resolved locally");
                Ok(None)
            }
            Self::Embedded { resources } => Ok(resources
                .iter()
                .find(|(resource, _)| *resource == name)
                .map(|(_, content)| content.as_bytes().to_vec())),
        }
    }
}

/// An isolated resource resolution unit.
///
/// A scope searches its own repositories in declaration order and only
/// consults its parent on a miss. Scopes never see their children or
/// siblings, which is what keeps the host's internal scope invisible to
/// the shared scope.
#[derive(Debug)]
pub struct LoadingScope {
    name: String,
    entries: Vec<RepositoryEntry>,
    repositories: Vec<Repository>,
    parent: Option<Arc<LoadingScope>>,
}

impl LoadingScope {
    pub fn new(
        name: impl Into<String>,
        entries: Vec<RepositoryEntry>,
        repositories: Vec<Repository>,
        parent: Option<Arc<LoadingScope>>,
    ) -> Self {
        Self {
            name: name.into(),
            entries,
            repositories,
            parent,
        }
    }

    /// The embedding environment's own scope, serving bundled resources.
    pub fn embedded() -> Arc<Self> {
        Arc::new(Self::new(
            EMBEDDED_SCOPE,
            Vec::new(),
            vec![Repository::Embedded {
                resources: EMBEDDED_RESOURCES,
            }],
            None,
        ))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The classified entries this scope was built from.
    pub fn entries(&self) -> &[RepositoryEntry] {
        &self.entries
    }

    /// The opened repositories, in search order.
    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    pub fn parent(&self) -> Option<&Arc<LoadingScope>> {
        self.parent.as_ref()
    }

    /// This scope followed by each ancestor up to the root.
    pub fn ancestry(&self) -> impl Iterator<Item = &LoadingScope> {
        std::iter::successors(Some(self), |scope| scope.parent.as_deref())
    }

    /// Resolve a resource, delegating to the parent on a local miss.
    ///
    /// Names are `/`-separated and relative; a leading `/` is ignored.
    /// Names escaping the repository root via `..` never resolve.
    pub fn resolve(&self, name: &str) -> Result<Option<Resource>> {
        for scope in self.ancestry() {
            if let Some(resource) = scope.resolve_local(name)? {
                return Ok(Some(resource));
            }
        }
        Ok(None)
    }

    /// Resolve a resource from this scope's own repositories only.
    pub fn resolve_local(&self, name: &str) -> Result<Option<Resource>> {
        let Some(normalized) = normalize_resource_name(name) else {
            tracing::debug!(scope = %self.name, resource = name, "Rejected resource name");
            return Ok(None);
        };

        for repository in &self.repositories {
            if let Some(bytes) = repository.read(&normalized)? {
                tracing::trace!(scope = %self.name, resource = %normalized, origin = %repository.origin(), "Resolved resource");
                return Ok(Some(Resource {
                    name: normalized,
                    scope: self.name.clone(),
                    origin: repository.origin(),
                    bytes,
                }));
            }
        }
        Ok(None)
    }

    /// Whether the resource is visible from this scope.
    pub fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.resolve(name)?.is_some())
    }
}

impl fmt::Display for LoadingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chain: Vec<&str> = self.ancestry().map(LoadingScope::name).collect();
        write!(f, "{}", chain.join(" -> "))
    }
}

fn normalize_resource_name(name: &str) -> Option<String> {
    let mut segments = Vec::new();
    for segment in name.split('/') {
        match segment {
            "" | "." => {}
            ".." => return None,
            other => segments.push(other),
        }
    }
    if segments.is_empty() {
        return None;
    }
    Some(segments.join("/"))
}
