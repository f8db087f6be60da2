//! Configtest command implementation

use catalina_core::{Bootstrap, LifecycleCommand};
use colored::Colorize;
use serde_json::json;

use super::Launch;
use crate::error::Result;
use crate::host::ReportingHost;

/// Bootstrap without starting the host and report what was resolved.
pub fn run_configtest(launch: &Launch, args: &[String], json: bool) -> Result<()> {
    let mut bootstrap = launch.bootstrap();
    let mut host = ReportingHost::new().quiet();
    bootstrap.run(LifecycleCommand::ConfigTest, &mut host, args)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report_json(&bootstrap, &host))?);
    } else {
        print_report(&bootstrap, &host);
    }
    Ok(())
}

fn report_json(bootstrap: &Bootstrap, host: &ReportingHost) -> serde_json::Value {
    let dirs = bootstrap.directories();
    json!({
        "home": dirs.home().as_str(),
        "base": dirs.base().as_str(),
        "config": bootstrap.config().origin().map(ToString::to_string),
        "state": bootstrap.state().to_string(),
        "layers": host.layers(),
    })
}

fn print_report(bootstrap: &Bootstrap, host: &ReportingHost) {
    let dirs = bootstrap.directories();
    println!("{}", "Configuration OK".green().bold());
    println!();
    println!("{}:   {}", "Home".dimmed(), dirs.home());
    println!("{}:   {}", "Base".dimmed(), dirs.base());
    match bootstrap.config().origin() {
        Some(origin) => println!("{}: {}", "Config".dimmed(), origin),
        None => println!("{}: {}", "Config".dimmed(), "none (empty configuration)".yellow()),
    }
    println!();

    println!("{}:", "Loading Scopes".bold());
    for layer in host.layers() {
        let parent = layer.parent.as_deref().unwrap_or("-");
        println!(
            "  {} {} (scope {}, parent {})",
            "+".green(),
            layer.layer.to_string().cyan(),
            layer.scope,
            parent
        );
        for entry in &layer.repositories {
            println!("      {} {}", entry.kind().to_string().dimmed(), entry.location());
        }
    }
}
