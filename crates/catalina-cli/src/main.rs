//! Catalina launcher
//!
//! Resolves the home and base directories, loads the bootstrap
//! configuration, builds the layered loading scopes and drives the host.

mod cli;
mod commands;
mod error;
mod host;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::Launch;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let cwd = std::env::current_dir()?;
    let launch = Launch::from_cli(&cli, &cwd)?;

    match cli.command.unwrap_or_default() {
        Commands::Start { args } => commands::run_start(&launch, &args),
        Commands::Stop { args } => commands::run_stop(&launch, &args),
        Commands::Configtest { json, args } => commands::run_configtest(&launch, &args, json),
    }
}

/// Log to stderr at `warn` (or `RUST_LOG`), raised to `debug` by `--verbose`.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("Verbose mode enabled");
}
