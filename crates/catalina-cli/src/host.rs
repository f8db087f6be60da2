//! Host adapter used by the launcher
//!
//! The launcher has no embedded application; it reports what the bootstrap
//! assembled and tracks lifecycle transitions.

use catalina_core::{Host, LayerReport, ScopeChain};
use colored::Colorize;

/// A host that records the resolved scopes and reports lifecycle events.
#[derive(Debug, Default)]
pub struct ReportingHost {
    layers: Vec<LayerReport>,
    args: Vec<String>,
    ready: bool,
    running: bool,
    quiet: bool,
}

impl ReportingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress lifecycle output, e.g. when printing machine-readable output.
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    pub fn layers(&self) -> &[LayerReport] {
        &self.layers
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Host for ReportingHost {
    fn init(&mut self, scopes: &ScopeChain, args: &[String]) -> catalina_core::Result<()> {
        self.layers = scopes.report();
        self.args = args.to_vec();
        for layer in &self.layers {
            tracing::debug!(
                layer = %layer.layer,
                scope = %layer.scope,
                repositories = layer.repositories.len(),
                "Host received loading scope"
            );
        }
        self.ready = true;
        Ok(())
    }

    fn start(&mut self) -> catalina_core::Result<()> {
        self.running = true;
        tracing::info!(args = ?self.args, "Host started");
        if !self.quiet {
            println!("{} host started", "OK".green().bold());
        }
        Ok(())
    }

    fn stop(&mut self) -> catalina_core::Result<()> {
        self.running = false;
        tracing::info!("Host stopped");
        if !self.quiet {
            println!("{} host stopped", "OK".green().bold());
        }
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}
