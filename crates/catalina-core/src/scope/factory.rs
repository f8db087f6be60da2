//! Construction of loading scopes from classified repository entries

use std::sync::Arc;

use catalina_fs::{NormalizedPath, io};

use super::repository::{ARCHIVE_SUFFIX, as_locator};
use super::{ArchiveRepository, LoadingScope, Repository, RepositoryEntry, RepositoryKind};
use crate::{Error, Result};

/// Turns repository entries into a [`LoadingScope`].
///
/// Implementations must fail with [`Error::ScopeConstructionFailed`] when a
/// directory or archive entry cannot be used.
pub trait ScopeFactory {
    fn construct(
        &self,
        name: &str,
        entries: Vec<RepositoryEntry>,
        parent: Option<Arc<LoadingScope>>,
    ) -> Result<Arc<LoadingScope>>;
}

/// Builds scopes backed by the local filesystem.
///
/// - directories must exist and be listable
/// - archives must open as zip files
/// - archive sets open every `*.jar` directly inside the directory, sorted
///   by file name; an empty set is allowed
/// - `file:` locators are opened like local paths; other locators are
///   recorded but never resolve
#[derive(Debug, Clone, Copy, Default)]
pub struct FsScopeFactory;

impl FsScopeFactory {
    pub fn new() -> Self {
        Self
    }

    fn open(&self, layer: &str, entry: &RepositoryEntry) -> Result<Vec<Repository>> {
        let failed = |reason: String| Error::ScopeConstructionFailed {
            layer: layer.to_string(),
            location: entry.location().to_string(),
            reason,
        };

        match entry.kind() {
            RepositoryKind::Directory => {
                let root = NormalizedPath::canonical(entry.location());
                io::ensure_readable_dir(&root).map_err(|e| failed(e.to_string()))?;
                tracing::debug!(layer, %root, "Added directory repository");
                Ok(vec![Repository::Directory { root }])
            }
            RepositoryKind::Archive => {
                let path = NormalizedPath::canonical(entry.location());
                let archive = ArchiveRepository::open(path).map_err(|e| failed(e.to_string()))?;
                tracing::debug!(layer, path = %archive.path(), entries = archive.len(), "Added archive repository");
                Ok(vec![Repository::Archive(archive)])
            }
            RepositoryKind::ArchiveSet => {
                let dir = NormalizedPath::canonical(entry.location());
                let members =
                    io::list_files_with_suffix(&dir, ARCHIVE_SUFFIX).map_err(|e| failed(e.to_string()))?;
                tracing::debug!(layer, %dir, archives = members.len(), "Added archive set");
                members
                    .into_iter()
                    .map(|member| {
                        ArchiveRepository::open(member)
                            .map(Repository::Archive)
                            .map_err(|e| failed(e.to_string()))
                    })
                    .collect()
            }
            RepositoryKind::RemoteLocator => {
                let url = as_locator(entry.location())
                    .ok_or_else(|| failed("not a recognized locator".to_string()))?;
                if url.scheme() != "file" {
                    tracing::debug!(layer, %url, "Recorded remote repository");
                    return Ok(vec![Repository::Remote { url }]);
                }

                let path = url
                    .to_file_path()
                    .map_err(|_| failed("does not name a local file".to_string()))?;
                let local = RepositoryEntry::classify(NormalizedPath::new(path).as_str());
                self.open(layer, &local)
            }
        }
    }
}

impl ScopeFactory for FsScopeFactory {
    fn construct(
        &self,
        name: &str,
        entries: Vec<RepositoryEntry>,
        parent: Option<Arc<LoadingScope>>,
    ) -> Result<Arc<LoadingScope>> {
        let mut repositories = Vec::with_capacity(entries.len());
        for entry in &entries {
            repositories.extend(self.open(name, entry)?);
        }
        Ok(Arc::new(LoadingScope::new(name, entries, repositories, parent)))
    }
}
