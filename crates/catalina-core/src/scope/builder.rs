//! Building one loading scope per configured layer

use std::sync::Arc;

use super::{LoadingScope, RepositoryEntry, ScopeFactory};
use crate::Result;
use crate::paths::parse_paths;
use crate::placeholder::PlaceholderResolver;

/// Suffix appended to a layer name to find its repository list.
pub const LOADER_SUFFIX: &str = ".loader";

/// The configuration key holding `name`'s repository list.
pub fn loader_key(name: &str) -> String {
    format!("{name}{LOADER_SUFFIX}")
}

/// Builds loading scopes from `<name>.loader` repository lists.
pub struct ScopeBuilder<'a, F: ScopeFactory + ?Sized> {
    resolver: PlaceholderResolver<'a>,
    factory: &'a F,
}

impl<'a, F: ScopeFactory + ?Sized> ScopeBuilder<'a, F> {
    pub fn new(resolver: PlaceholderResolver<'a>, factory: &'a F) -> Self {
        Self { resolver, factory }
    }

    /// The classified repositories configured for `name`.
    ///
    /// Returns `None` when the list is absent or empty. Placeholders are
    /// resolved before the list is split, and malformed quoting is rejected
    /// before any filesystem access.
    pub fn repositories(&self, name: &str) -> Result<Option<Vec<RepositoryEntry>>> {
        let key = loader_key(name);
        let value = match self.resolver.config().get(&key) {
            Some(value) if !value.is_empty() => value,
            _ => return Ok(None),
        };

        let resolved = self.resolver.resolve(value);
        let entries: Vec<RepositoryEntry> = parse_paths(&resolved)?
            .iter()
            .map(|path| RepositoryEntry::classify(path))
            .collect();

        for entry in &entries {
            tracing::debug!(layer = name, location = entry.location(), kind = %entry.kind(), "Classified repository");
        }
        Ok(Some(entries))
    }

    /// Build the scope for `name`, or pass `parent` through unchanged when
    /// no repositories are configured.
    pub fn build(
        &self,
        name: &str,
        parent: Option<Arc<LoadingScope>>,
    ) -> Result<Option<Arc<LoadingScope>>> {
        let Some(entries) = self.repositories(name)? else {
            tracing::debug!(layer = name, "No repositories configured, reusing parent scope");
            return Ok(parent);
        };

        match self.factory.construct(name, entries, parent) {
            Ok(scope) => {
                tracing::info!(layer = name, repositories = scope.repositories().len(), "Created loading scope");
                Ok(Some(scope))
            }
            Err(e) => {
                tracing::error!(layer = name, error = %e, "Loading scope creation failed");
                Err(e)
            }
        }
    }
}
