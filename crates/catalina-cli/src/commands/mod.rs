//! Command implementations for catalina-cli

pub mod configtest;
pub mod lifecycle;

use std::path::{Path, PathBuf};

use catalina_core::config::{BASE_KEY, CONFIG_KEY, HOME_KEY};
use catalina_core::{Bootstrap, SystemProperties};
use catalina_fs::NormalizedPath;

use crate::cli::Cli;
use crate::error::{CliError, Result};

pub use configtest::run_configtest;
pub use lifecycle::{run_start, run_stop};

/// Everything needed to construct a [`Bootstrap`] from the command line.
#[derive(Debug, Clone)]
pub struct Launch {
    working_dir: PathBuf,
    system: SystemProperties,
}

impl Launch {
    /// Seed the ambient properties from the environment, then apply `-D`
    /// definitions, then the explicit directory flags.
    pub fn from_cli(cli: &Cli, working_dir: &Path) -> Result<Self> {
        let mut system = SystemProperties::from_env();
        system.extend(cli.defines.iter().cloned());

        if let Some(home) = &cli.home {
            let home = working_dir.join(home);
            if !home.is_dir() {
                return Err(CliError::user(format!(
                    "home directory does not exist: {}",
                    home.display()
                )));
            }
            system.set(HOME_KEY, NormalizedPath::new(&home).as_str());
        }
        if let Some(base) = &cli.base {
            system.set(BASE_KEY, NormalizedPath::new(working_dir.join(base)).as_str());
        }
        if let Some(config) = &cli.config {
            system.set(CONFIG_KEY, config.as_str());
        }

        Ok(Self {
            working_dir: working_dir.to_path_buf(),
            system,
        })
    }

    /// Start from an explicit property set.
    #[cfg(test)]
    pub fn with_properties(system: SystemProperties, working_dir: &Path) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            system,
        }
    }

    pub fn bootstrap(&self) -> Bootstrap {
        Bootstrap::new(self.system.clone(), &self.working_dir)
    }
}
