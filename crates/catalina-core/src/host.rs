//! Contract between the bootstrap sequencer and the hosted application

use crate::Result;
use crate::bootstrap::ScopeChain;

/// The application whose environment the bootstrap assembles.
///
/// `init` is called exactly once, after every loading scope has been built.
/// `start` and `stop` are only called after a successful `init`.
pub trait Host {
    /// Prepare the host with its loading scopes and the remaining
    /// command-line arguments.
    fn init(&mut self, scopes: &ScopeChain, args: &[String]) -> Result<()>;

    fn start(&mut self) -> Result<()>;

    fn stop(&mut self) -> Result<()>;

    /// Whether `init` left the host able to serve.
    fn is_ready(&self) -> bool;
}
