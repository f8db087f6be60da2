//! Bootstrap resolver for a layered application host
//!
//! Assembles the environment a host process starts in:
//!
//! - **Configuration**: discover home and base directories, then load
//!   `catalina.properties` from an override, the instance directory or the
//!   embedded defaults
//! - **Placeholders**: expand `${name}` references in configured values
//! - **Repository lists**: split quoted, comma-separated path lists
//! - **Loading scopes**: build the `common`, `server` and `shared` scopes,
//!   each delegating to its parent
//!
//! # Architecture
//!
//! ```text
//!                catalina-cli
//!                     |
//!               catalina-core
//!   config -> placeholder -> paths -> scope -> bootstrap -> host
//!                     |
//!                catalina-fs
//! ```
//!
//! # Example
//!
//! ```ignore
//! use catalina_core::{Bootstrap, SystemProperties};
//!
//! let mut bootstrap = Bootstrap::new(SystemProperties::from_env(), &std::env::current_dir()?);
//! let scopes = bootstrap.init_scopes()?;
//! println!("{}", scopes.shared());
//! ```

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod host;
pub mod paths;
pub mod placeholder;
pub mod scope;

pub use bootstrap::{Bootstrap, BootstrapState, Layer, LayerReport, LifecycleCommand, ScopeChain};
pub use config::{BaseDirectories, ConfigOrigin, ConfigSource, ProcessConfig, SystemProperties};
pub use error::{Error, Result};
pub use host::Host;
pub use paths::parse_paths;
pub use placeholder::PlaceholderResolver;
pub use scope::{
    FsScopeFactory, LoadingScope, Repository, RepositoryEntry, RepositoryKind, Resource,
    ScopeBuilder, ScopeFactory,
};
