//! Home and base directory discovery

use std::path::Path;

use catalina_fs::{InstallPath, NormalizedPath};

use super::SystemProperties;

/// Property naming the explicit home (binary) directory.
pub const HOME_KEY: &str = "catalina.home";

/// Property naming the explicit base (instance) directory.
pub const BASE_KEY: &str = "catalina.base";

/// Property naming an explicit configuration location (a URL).
pub const CONFIG_KEY: &str = "catalina.config";

/// The two directories every other bootstrap step is relative to.
///
/// `home` holds the shared binaries, `base` the per-instance configuration.
/// They are the same directory unless `catalina.base` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseDirectories {
    home: NormalizedPath,
    base: NormalizedPath,
}

impl BaseDirectories {
    /// Use the given directories verbatim.
    pub fn new(home: impl Into<NormalizedPath>, base: impl Into<NormalizedPath>) -> Self {
        Self {
            home: home.into(),
            base: base.into(),
        }
    }

    /// Discover `home` and `base` from properties and the working directory.
    ///
    /// `home` is taken from `catalina.home` if set. Otherwise, if the working
    /// directory contains `bootstrap.jar` it is assumed to be `<home>/bin`
    /// and its parent is used. As a last resort the working directory itself
    /// is `home`. `base` is `catalina.base` if set, else `home`.
    ///
    /// Relative overrides are interpreted against `working_dir`.
    pub fn discover(props: &SystemProperties, working_dir: &Path) -> Self {
        let home = match non_empty(props, HOME_KEY) {
            Some(home) => {
                tracing::debug!(home, "Using explicit home directory");
                NormalizedPath::canonical(working_dir.join(home))
            }
            None if working_dir.join(InstallPath::MarkerArchive).exists() => {
                tracing::debug!(?working_dir, "Found marker archive, using parent of working directory as home");
                NormalizedPath::canonical(working_dir.join(".."))
            }
            None => {
                tracing::debug!(?working_dir, "Using working directory as home");
                NormalizedPath::canonical(working_dir)
            }
        };

        let base = match non_empty(props, BASE_KEY) {
            Some(base) => NormalizedPath::canonical(working_dir.join(base)),
            None => home.clone(),
        };

        Self { home, base }
    }

    pub fn home(&self) -> &NormalizedPath {
        &self.home
    }

    pub fn base(&self) -> &NormalizedPath {
        &self.base
    }

    /// `{base}/conf`
    pub fn conf_dir(&self) -> NormalizedPath {
        self.base.join(InstallPath::ConfDir)
    }

    /// `{base}/conf/catalina.properties`
    pub fn properties_file(&self) -> NormalizedPath {
        self.conf_dir().join(InstallPath::PropertiesFile)
    }

    /// Publish both directories under their reserved keys.
    pub fn publish(&self, props: &mut SystemProperties) {
        props.set(HOME_KEY, self.home.as_str());
        props.set(BASE_KEY, self.base.as_str());
    }
}

fn non_empty<'a>(props: &'a SystemProperties, key: &str) -> Option<&'a str> {
    props.get(key).filter(|value| !value.trim().is_empty())
}
