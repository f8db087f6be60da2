//! Bootstrap sequencing
//!
//! Drives the fixed sequence
//!
//! ```text
//! Uninitialized -> ConfigLoaded -> FoundationScopeBuilt -> HostScopeBuilt
//!               -> SharedScopeBuilt -> Ready
//! ```
//!
//! Loading the configuration cannot fail. Any failure after that is
//! terminal: partially built scopes are dropped and the state becomes
//! [`BootstrapState::Failed`].

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::{BaseDirectories, ConfigSource, ProcessConfig, SystemProperties};
use crate::host::Host;
use crate::placeholder::PlaceholderResolver;
use crate::scope::{FsScopeFactory, LoadingScope, RepositoryEntry, ScopeBuilder, ScopeFactory};
use crate::{Error, Result};

/// The fixed layers of the scope chain, in build order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Foundation scope shared by the host and hosted code
    Common,
    /// The host's internal scope, invisible to hosted code
    Server,
    /// Scope shared by all hosted applications
    Shared,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Common, Layer::Server, Layer::Shared];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Server => "server",
            Self::Shared => "shared",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Progress of the bootstrap sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BootstrapState {
    Uninitialized,
    ConfigLoaded,
    FoundationScopeBuilt,
    HostScopeBuilt,
    SharedScopeBuilt,
    Ready,
    Failed,
}

impl fmt::Display for BootstrapState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::ConfigLoaded => "config-loaded",
            Self::FoundationScopeBuilt => "foundation-scope-built",
            Self::HostScopeBuilt => "host-scope-built",
            Self::SharedScopeBuilt => "shared-scope-built",
            Self::Ready => "ready",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Lifecycle verbs understood by [`Bootstrap::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleCommand {
    Start,
    Stop,
    ConfigTest,
}

impl fmt::Display for LifecycleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::ConfigTest => "configtest",
        };
        f.write_str(name)
    }
}

/// The three built scopes.
///
/// A layer without repositories shares its parent's scope, so `server` and
/// `shared` may be the same `Arc` as `common`.
#[derive(Debug, Clone)]
pub struct ScopeChain {
    common: Arc<LoadingScope>,
    server: Arc<LoadingScope>,
    shared: Arc<LoadingScope>,
}

impl ScopeChain {
    pub fn get(&self, layer: Layer) -> &Arc<LoadingScope> {
        match layer {
            Layer::Common => &self.common,
            Layer::Server => &self.server,
            Layer::Shared => &self.shared,
        }
    }

    pub fn common(&self) -> &Arc<LoadingScope> {
        &self.common
    }

    pub fn server(&self) -> &Arc<LoadingScope> {
        &self.server
    }

    pub fn shared(&self) -> &Arc<LoadingScope> {
        &self.shared
    }

    /// Summarize each layer for display.
    pub fn report(&self) -> Vec<LayerReport> {
        Layer::ALL
            .iter()
            .map(|&layer| {
                let scope = self.get(layer);
                LayerReport {
                    layer,
                    scope: scope.name().to_string(),
                    parent: scope.parent().map(|p| p.name().to_string()),
                    repositories: scope.entries().to_vec(),
                }
            })
            .collect()
    }
}

/// How one layer was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerReport {
    pub layer: Layer,
    /// Name of the scope serving the layer
    pub scope: String,
    pub parent: Option<String>,
    pub repositories: Vec<RepositoryEntry>,
}

/// Owns all bootstrap state and sequences the steps.
pub struct Bootstrap<F: ScopeFactory = FsScopeFactory> {
    state: BootstrapState,
    system: SystemProperties,
    dirs: BaseDirectories,
    config: ProcessConfig,
    factory: F,
    embedded: Arc<LoadingScope>,
    common: Option<Arc<LoadingScope>>,
    server: Option<Arc<LoadingScope>>,
    shared: Option<Arc<LoadingScope>>,
}

impl Bootstrap {
    /// Discover directories from `system` and `working_dir` and use the
    /// filesystem scope factory.
    pub fn new(system: SystemProperties, working_dir: &Path) -> Self {
        let dirs = BaseDirectories::discover(&system, working_dir);
        Self::with_directories(system, dirs, FsScopeFactory)
    }
}

impl<F: ScopeFactory> Bootstrap<F> {
    /// Use explicit directories and a custom scope factory.
    ///
    /// The directories are published into `system` immediately.
    pub fn with_directories(mut system: SystemProperties, dirs: BaseDirectories, factory: F) -> Self {
        dirs.publish(&mut system);
        tracing::debug!(home = %dirs.home(), base = %dirs.base(), "Resolved base directories");
        Self {
            state: BootstrapState::Uninitialized,
            system,
            dirs,
            config: ProcessConfig::empty(),
            factory,
            embedded: LoadingScope::embedded(),
            common: None,
            server: None,
            shared: None,
        }
    }

    pub fn state(&self) -> BootstrapState {
        self.state
    }

    pub fn directories(&self) -> &BaseDirectories {
        &self.dirs
    }

    pub fn config(&self) -> &ProcessConfig {
        &self.config
    }

    pub fn system(&self) -> &SystemProperties {
        &self.system
    }

    /// Load the configuration. Degrades to an empty configuration instead
    /// of failing.
    pub fn load_config(&mut self) -> Result<&ProcessConfig> {
        self.expect_state(BootstrapState::Uninitialized)?;
        self.config = ConfigSource::new(&self.dirs).load(&mut self.system);
        self.transition(BootstrapState::ConfigLoaded);
        Ok(&self.config)
    }

    /// Build the `common` scope, falling back to the embedding
    /// environment's scope when no repositories are configured.
    pub fn build_foundation_scope(&mut self) -> Result<Arc<LoadingScope>> {
        self.expect_state(BootstrapState::ConfigLoaded)?;
        let scope = self
            .guard(|boot| boot.build_layer(Layer::Common, None))?
            .unwrap_or_else(|| Arc::clone(&self.embedded));
        self.common = Some(Arc::clone(&scope));
        self.transition(BootstrapState::FoundationScopeBuilt);
        Ok(scope)
    }

    /// Build the `server` scope on top of `common`.
    pub fn build_host_scope(&mut self) -> Result<Arc<LoadingScope>> {
        self.expect_state(BootstrapState::FoundationScopeBuilt)?;
        let scope = self.build_on_common(Layer::Server)?;
        self.server = Some(Arc::clone(&scope));
        self.transition(BootstrapState::HostScopeBuilt);
        Ok(scope)
    }

    /// Build the `shared` scope on top of `common`.
    pub fn build_shared_scope(&mut self) -> Result<Arc<LoadingScope>> {
        self.expect_state(BootstrapState::HostScopeBuilt)?;
        let scope = self.build_on_common(Layer::Shared)?;
        self.shared = Some(Arc::clone(&scope));
        self.transition(BootstrapState::SharedScopeBuilt);
        Ok(scope)
    }

    /// Run every remaining step up to [`BootstrapState::SharedScopeBuilt`].
    pub fn init_scopes(&mut self) -> Result<ScopeChain> {
        if self.state == BootstrapState::Uninitialized {
            self.load_config()?;
        }
        self.build_foundation_scope()?;
        self.build_host_scope()?;
        self.build_shared_scope()?;
        self.scopes().ok_or(Error::InvalidState {
            expected: BootstrapState::SharedScopeBuilt,
            actual: self.state,
        })
    }

    /// Build every scope and hand them to `host`.
    pub fn init(&mut self, host: &mut dyn Host, args: &[String]) -> Result<ScopeChain> {
        let chain = self.init_scopes()?;
        self.guard(|_| host.init(&chain, args))?;
        self.transition(BootstrapState::Ready);
        Ok(chain)
    }

    /// Bootstrap, then perform `command` on the host.
    pub fn run(
        &mut self,
        command: LifecycleCommand,
        host: &mut dyn Host,
        args: &[String],
    ) -> Result<()> {
        self.init(host, args)?;
        let outcome = match command {
            LifecycleCommand::Start => host.start(),
            LifecycleCommand::Stop => host.stop(),
            LifecycleCommand::ConfigTest if host.is_ready() => Ok(()),
            LifecycleCommand::ConfigTest => Err(Error::host("configtest", "host reported not ready")),
        };
        outcome.inspect_err(|e| tracing::error!(%command, error = %e, "Lifecycle command failed"))
    }

    /// The built scopes, once all three layers exist.
    pub fn scopes(&self) -> Option<ScopeChain> {
        Some(ScopeChain {
            common: Arc::clone(self.common.as_ref()?),
            server: Arc::clone(self.server.as_ref()?),
            shared: Arc::clone(self.shared.as_ref()?),
        })
    }

    fn build_on_common(&mut self, layer: Layer) -> Result<Arc<LoadingScope>> {
        let common = self.common.clone().ok_or(Error::InvalidState {
            expected: BootstrapState::FoundationScopeBuilt,
            actual: self.state,
        })?;
        let scope = self
            .guard(|boot| boot.build_layer(layer, Some(Arc::clone(&common))))?
            .unwrap_or(common);
        Ok(scope)
    }

    fn build_layer(
        &self,
        layer: Layer,
        parent: Option<Arc<LoadingScope>>,
    ) -> Result<Option<Arc<LoadingScope>>> {
        let resolver = PlaceholderResolver::new(&self.dirs, &self.config, &self.system);
        ScopeBuilder::new(resolver, &self.factory).build(layer.name(), parent)
    }

    /// Run a fatal step, moving to `Failed` and dropping every built scope
    /// if it errors.
    fn guard<T>(&mut self, step: impl FnOnce(&Self) -> Result<T>) -> Result<T> {
        let outcome = step(self);
        if let Err(e) = &outcome {
            tracing::error!(state = %self.state, error = %e, "Bootstrap failed");
            self.common = None;
            self.server = None;
            self.shared = None;
            self.state = BootstrapState::Failed;
        }
        outcome
    }

    fn expect_state(&self, expected: BootstrapState) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(Error::InvalidState {
                expected,
                actual: self.state,
            })
        }
    }

    fn transition(&mut self, next: BootstrapState) {
        tracing::info!(from = %self.state, to = %next, "Bootstrap state transition");
        self.state = next;
    }
}
