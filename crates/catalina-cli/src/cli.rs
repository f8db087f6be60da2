//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Catalina - Resolve the bootstrap environment and launch the host
#[derive(Parser, Debug)]
#[command(name = "catalina")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Home (binary) directory; overrides discovery from the working directory
    #[arg(long, global = true, env = "CATALINA_HOME")]
    pub home: Option<PathBuf>,

    /// Base (instance) directory; defaults to the home directory
    #[arg(long, global = true, env = "CATALINA_BASE")]
    pub base: Option<PathBuf>,

    /// Explicit configuration location, as a file: URL
    #[arg(long, global = true, env = "CATALINA_CONFIG")]
    pub config: Option<String>,

    /// Set a system property (repeatable)
    #[arg(short = 'D', value_name = "KEY=VALUE", global = true, value_parser = parse_define)]
    pub defines: Vec<(String, String)>,

    /// The command to run (defaults to start)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Build the loading scopes and start the host
    Start {
        /// Arguments passed through to the host
        #[arg(last = true)]
        args: Vec<String>,
    },

    /// Build the loading scopes and stop the host
    Stop {
        /// Arguments passed through to the host
        #[arg(last = true)]
        args: Vec<String>,
    },

    /// Verify the configuration and report the resolved scopes
    ///
    /// Examples:
    ///   catalina configtest
    ///   catalina configtest --json
    ///   catalina --base /srv/instance configtest
    Configtest {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        /// Arguments passed through to the host
        #[arg(last = true)]
        args: Vec<String>,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Self::Start { args: Vec::new() }
    }
}

/// Parse a `KEY=VALUE` property definition.
///
/// A definition without `=` sets the key to an empty value.
fn parse_define(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw.split_once('=').unwrap_or((raw, ""));
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("property definition '{raw}' has an empty key"));
    }
    Ok((key.to_string(), value.to_string()))
}
