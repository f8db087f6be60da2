//! Cascading discovery of the bootstrap property set

use std::collections::BTreeMap;
use std::fmt;

use catalina_fs::{NormalizedPath, io};
use url::Url;

use super::{BaseDirectories, CONFIG_KEY, SystemProperties, properties};
use crate::{Error, Result};

/// Configuration bundled with the crate, used when nothing else is found.
pub const DEFAULT_PROPERTIES: &str = include_str!("../../resources/catalina.properties");

/// Where a [`ProcessConfig`] was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Explicit configuration location (a URL)
    Override(String),
    /// `{base}/conf/catalina.properties`
    File(NormalizedPath),
    /// Bundled default
    Embedded,
}

impl fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Override(location) => write!(f, "{location}"),
            Self::File(path) => write!(f, "{path}"),
            Self::Embedded => write!(f, "<embedded default>"),
        }
    }
}

/// The loaded bootstrap configuration.
///
/// Either fully populated from one origin or empty; never a mix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessConfig {
    entries: BTreeMap<String, String>,
    origin: Option<ConfigOrigin>,
}

impl ProcessConfig {
    /// An empty configuration with no origin.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(entries: BTreeMap<String, String>, origin: ConfigOrigin) -> Self {
        Self {
            entries,
            origin: Some(origin),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The origin the entries came from, `None` if loading degraded.
    pub fn origin(&self) -> Option<&ConfigOrigin> {
        self.origin.as_ref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ProcessConfig {
    /// Build an in-memory configuration, mostly useful in tests.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            origin: None,
        }
    }
}

/// Locates and loads the bootstrap property set.
///
/// Origins are tried in order, stopping at the first that yields content:
///
/// 1. An explicit location, given to [`with_override_location`] or found
///    under `catalina.config`. Only `file:` URLs can be opened.
/// 2. `{base}/conf/catalina.properties`
/// 3. The embedded default ([`DEFAULT_PROPERTIES`])
///
/// [`with_override_location`]: ConfigSource::with_override_location
pub struct ConfigSource<'a> {
    dirs: &'a BaseDirectories,
    override_location: Option<String>,
    embedded: Option<&'static str>,
}

impl<'a> ConfigSource<'a> {
    pub fn new(dirs: &'a BaseDirectories) -> Self {
        Self {
            dirs,
            override_location: None,
            embedded: Some(DEFAULT_PROPERTIES),
        }
    }

    /// Try `location` before any other origin.
    pub fn with_override_location(mut self, location: impl Into<String>) -> Self {
        self.override_location = Some(location.into());
        self
    }

    /// Replace the embedded fallback; `None` disables it.
    pub fn with_embedded(mut self, embedded: Option<&'static str>) -> Self {
        self.embedded = embedded;
        self
    }

    /// Load the configuration and mirror every key into `props`.
    ///
    /// Never fails: if no origin yields content, or the chosen content
    /// cannot be parsed, a warning is logged and an empty configuration is
    /// returned.
    pub fn load(&self, props: &mut SystemProperties) -> ProcessConfig {
        let override_location = self
            .override_location
            .clone()
            .or_else(|| props.get(CONFIG_KEY).map(str::to_string));

        let config = match self.locate(override_location.as_deref()) {
            Ok((origin, content)) => match properties::parse(&content) {
                Ok(entries) => {
                    tracing::info!(%origin, keys = entries.len(), "Loaded bootstrap configuration");
                    ProcessConfig::new(entries, origin)
                }
                Err(e) => {
                    tracing::warn!(%origin, error = %e, "Failed to load bootstrap configuration, using defaults");
                    ProcessConfig::empty()
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load bootstrap configuration, using defaults");
                ProcessConfig::empty()
            }
        };

        for (key, value) in config.iter() {
            props.set(key, value);
        }
        config
    }

    fn locate(&self, override_location: Option<&str>) -> Result<(ConfigOrigin, String)> {
        if let Some(location) = override_location {
            match open_location(location) {
                Ok(content) => return Ok((ConfigOrigin::Override(location.to_string()), content)),
                Err(e) => tracing::debug!(location, error = %e, "Explicit configuration location not usable"),
            }
        }

        let file = self.dirs.properties_file();
        match io::read_text(&file) {
            Ok(content) => return Ok((ConfigOrigin::File(file), content)),
            Err(e) => tracing::debug!(%file, error = %e, "No configuration file under base"),
        }

        self.embedded
            .map(|content| (ConfigOrigin::Embedded, content.to_string()))
            .ok_or_else(|| Error::ConfigUnavailable {
                reason: "no configuration origin could be opened".to_string(),
            })
    }
}

/// Open an explicit configuration location.
///
/// Network I/O is out of scope during bootstrap, so only `file:` URLs are
/// readable.
fn open_location(location: &str) -> Result<String> {
    let url = Url::parse(location).map_err(|e| Error::ConfigUnavailable {
        reason: format!("invalid location [{location}]: {e}"),
    })?;
    if url.scheme() != "file" {
        return Err(Error::ConfigUnavailable {
            reason: format!("unsupported scheme '{}' in [{location}]", url.scheme()),
        });
    }
    let path = url.to_file_path().map_err(|_| Error::ConfigUnavailable {
        reason: format!("[{location}] does not name a local file"),
    })?;
    Ok(io::read_text(&NormalizedPath::new(path))?)
}
