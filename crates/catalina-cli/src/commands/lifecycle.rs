//! Start and stop commands

use catalina_core::LifecycleCommand;

use super::Launch;
use crate::error::Result;
use crate::host::ReportingHost;

/// Bootstrap and start the host.
pub fn run_start(launch: &Launch, args: &[String]) -> Result<()> {
    run(launch, LifecycleCommand::Start, args)
}

/// Bootstrap and stop the host.
pub fn run_stop(launch: &Launch, args: &[String]) -> Result<()> {
    run(launch, LifecycleCommand::Stop, args)
}

fn run(launch: &Launch, command: LifecycleCommand, args: &[String]) -> Result<()> {
    let mut bootstrap = launch.bootstrap();
    let mut host = ReportingHost::new();
    bootstrap.run(command, &mut host, args)?;
    tracing::debug!(%command, state = %bootstrap.state(), running = host.is_running(), "Lifecycle command completed");
    Ok(())
}
