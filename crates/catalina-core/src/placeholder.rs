//! `${name}` substitution in configuration values

use crate::config::{BASE_KEY, BaseDirectories, HOME_KEY, ProcessConfig, SystemProperties};

const OPEN: &str = "${";
const CLOSE: char = '}';

/// Rewrites `${name}` tokens in configuration values.
///
/// Names resolve in this order:
///
/// 1. `catalina.home` and `catalina.base`, straight from [`BaseDirectories`]
/// 2. the loaded [`ProcessConfig`]
/// 3. the ambient [`SystemProperties`]
///
/// Unknown or empty names are left in place as `${name}`. Substitution is a
/// single left-to-right pass; substituted values are not rescanned.
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderResolver<'a> {
    dirs: &'a BaseDirectories,
    config: &'a ProcessConfig,
    system: &'a SystemProperties,
}

impl<'a> PlaceholderResolver<'a> {
    pub fn new(
        dirs: &'a BaseDirectories,
        config: &'a ProcessConfig,
        system: &'a SystemProperties,
    ) -> Self {
        Self {
            dirs,
            config,
            system,
        }
    }

    pub fn config(&self) -> &'a ProcessConfig {
        self.config
    }

    /// Substitute every resolvable placeholder in `raw`.
    ///
    /// An opening `${` without a closing `}` ends the scan; the remainder,
    /// including the unterminated marker, is copied through unchanged.
    pub fn resolve(&self, raw: &str) -> String {
        let Some(mut start) = raw.find(OPEN) else {
            return raw.to_string();
        };

        let mut out = String::with_capacity(raw.len());
        let mut cursor = 0;
        loop {
            out.push_str(&raw[cursor..start]);

            let name_start = start + OPEN.len();
            let Some(name_len) = raw[name_start..].find(CLOSE) else {
                // TODO: surface unterminated placeholders as a config warning once
                // callers can report non-fatal diagnostics.
                tracing::debug!(value = raw, "Unterminated placeholder, copying remainder verbatim");
                cursor = start;
                break;
            };
            let end = name_start + name_len;

            match self.lookup(&raw[name_start..end]) {
                Some(value) => out.push_str(value),
                None => out.push_str(&raw[start..=end]),
            }

            cursor = end + 1;
            match raw[cursor..].find(OPEN) {
                Some(next) => start = cursor + next,
                None => break,
            }
        }
        out.push_str(&raw[cursor..]);
        out
    }

    /// Look up a single placeholder name.
    pub fn lookup(&self, name: &str) -> Option<&'a str> {
        match name {
            "" => None,
            HOME_KEY => Some(self.dirs.home().as_str()),
            BASE_KEY => Some(self.dirs.base().as_str()),
            _ => self.config.get(name).or_else(|| self.system.get(name)),
        }
    }
}
