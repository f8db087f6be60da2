//! Bootstrap configuration
//!
//! Everything the later steps need before any loading scope exists:
//!
//! - [`SystemProperties`]: the ambient property store
//! - [`BaseDirectories`]: `catalina.home` and `catalina.base`
//! - [`ConfigSource`]: cascading discovery of `catalina.properties`
//! - [`ProcessConfig`]: the loaded key/value set
//!
//! # Example
//!
//! ```ignore
//! use catalina_core::config::{BaseDirectories, ConfigSource, SystemProperties};
//!
//! let mut props = SystemProperties::from_env();
//! let dirs = BaseDirectories::discover(&props, &std::env::current_dir()?);
//! dirs.publish(&mut props);
//! let config = ConfigSource::new(&dirs).load(&mut props);
//! ```

mod dirs;
pub mod properties;
mod source;
mod system;

pub use dirs::{BASE_KEY, BaseDirectories, CONFIG_KEY, HOME_KEY};
pub use source::{ConfigOrigin, ConfigSource, DEFAULT_PROPERTIES, ProcessConfig};
pub use system::SystemProperties;
