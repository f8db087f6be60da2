//! Layered loading scopes
//!
//! A repository list such as
//!
//! ```text
//! common.loader="${catalina.base}/lib","${catalina.base}/lib/*.jar"
//! ```
//!
//! is resolved, split and classified into [`RepositoryEntry`] values, which a
//! [`ScopeFactory`] opens into a [`LoadingScope`] chained to a parent.

mod builder;
mod factory;
mod loader;
mod repository;

pub use builder::{LOADER_SUFFIX, ScopeBuilder, loader_key};
pub use factory::{FsScopeFactory, ScopeFactory};
pub use loader::{ArchiveRepository, EMBEDDED_SCOPE, LoadingScope, Repository, Resource};
pub use repository::{ARCHIVE_SET_SUFFIX, ARCHIVE_SUFFIX, RepositoryEntry, RepositoryKind};
