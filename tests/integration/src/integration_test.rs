//! End-to-end tests for the bootstrap sequence
//!
//! Each test lays out a home and an instance directory, then runs the full
//! flow: directory discovery -> configuration loading -> placeholder
//! resolution -> repository parsing -> scope construction -> host init.

use catalina_core::config::{BASE_KEY, CONFIG_KEY, HOME_KEY};
use catalina_core::{
    Bootstrap, BootstrapState, ConfigOrigin, Error, Host, LifecycleCommand, ScopeChain,
    SystemProperties,
};
use catalina_fs::NormalizedPath;
use catalina_test_utils::TestInstall;
use pretty_assertions::assert_eq;

#[derive(Default)]
struct ProbeHost {
    probes: Vec<(String, Option<String>)>,
    started: bool,
}

impl ProbeHost {
    /// Resolve each name from the shared scope when the host is initialized.
    fn probing(names: &[&str]) -> Self {
        Self {
            probes: names.iter().map(|n| (n.to_string(), None)).collect(),
            started: false,
        }
    }
}

impl Host for ProbeHost {
    fn init(&mut self, scopes: &ScopeChain, _args: &[String]) -> catalina_core::Result<()> {
        for (name, found) in &mut self.probes {
            *found = scopes
                .shared()
                .resolve(name)?
                .map(|r| String::from_utf8_lossy(r.bytes()).into_owned());
        }
        Ok(())
    }

    fn start(&mut self) -> catalina_core::Result<()> {
        self.started = true;
        Ok(())
    }

    fn stop(&mut self) -> catalina_core::Result<()> {
        self.started = false;
        Ok(())
    }

    fn is_ready(&self) -> bool {
        true
    }
}

fn props(pairs: &[(&str, String)]) -> SystemProperties {
    pairs.iter().map(|(k, v)| (*k, v.clone())).collect()
}

#[test]
fn instance_libraries_shadow_home_libraries() {
    let home = TestInstall::new();
    let instance = TestInstall::new();
    home.write_jar("lib/version.jar", &[("version.txt", "home"), ("home-only.txt", "h")]);
    instance.write_jar("lib/version.jar", &[("version.txt", "instance")]);

    let system = props(&[(HOME_KEY, home.root_str()), (BASE_KEY, instance.root_str())]);
    let mut bootstrap = Bootstrap::new(system, instance.root());
    let mut host = ProbeHost::probing(&["version.txt", "home-only.txt", "conf/catalina.properties"]);

    bootstrap.run(LifecycleCommand::Start, &mut host, &[]).unwrap();

    assert!(host.started);
    assert_eq!(bootstrap.state(), BootstrapState::Ready);
    assert_eq!(host.probes[0].1.as_deref(), Some("instance"));
    assert_eq!(host.probes[1].1.as_deref(), Some("h"));
    // The embedded scope sits at the root of every chain.
    assert!(host.probes[2].1.as_deref().unwrap().contains("common.loader"));
    assert_eq!(bootstrap.config().origin(), Some(&ConfigOrigin::Embedded));
}

#[test]
fn instance_configuration_drives_all_three_layers() {
    let install = TestInstall::new();
    install.write_jar("lib/common.jar", &[("common.txt", "common")]);
    install.write_jar("server lib, internal/catalina.jar", &[("server.txt", "server")]);
    install.write_file("shared/classes/app.properties", "shared=yes");
    install.write_properties(concat!(
        "# layered layout\n",
        "common.loader=\"${catalina.home}/lib\",\"${catalina.home}/lib/*.jar\"\n",
        "server.loader=\"${catalina.home}/server lib, internal/*.jar\"\n",
        "shared.loader=${catalina.base}/shared/classes,\\\n",
        "    ${catalina.base}/shared/missing/*.jar\n",
    ));
    install.mkdir("shared/missing");

    let system = props(&[(HOME_KEY, install.root_str())]);
    let mut bootstrap = Bootstrap::new(system, install.root());
    let chain = bootstrap.init_scopes().unwrap();

    assert_eq!(chain.server().to_string(), "server -> common -> embedded");
    assert_eq!(chain.shared().to_string(), "shared -> common -> embedded");
    assert!(chain.server().resolve("server.txt").unwrap().is_some());
    assert!(chain.shared().resolve("server.txt").unwrap().is_none());
    assert_eq!(
        chain.shared().resolve("app.properties").unwrap().unwrap().bytes(),
        b"shared=yes"
    );
    assert_eq!(
        chain.shared().resolve("common.txt").unwrap().unwrap().scope(),
        "common"
    );

    let expected = NormalizedPath::canonical(install.root()).join("conf/catalina.properties");
    assert_eq!(bootstrap.config().origin(), Some(&ConfigOrigin::File(expected)));
    assert_eq!(
        bootstrap.system().get("shared.loader"),
        bootstrap.config().get("shared.loader")
    );
}

#[test]
fn explicit_config_location_and_system_properties() {
    let install = TestInstall::new();
    install.mkdir("apps/lib");
    install.write_jar("apps/lib/app.jar", &[("app.txt", "app")]);
    install.write_properties("common.loader=${catalina.home}/does-not-exist\n");
    let custom = install.write_file(
        "custom/catalina.properties",
        "common.loader=\"${apps.root}/lib/*.jar\"\n",
    );
    let custom_url = format!("file://{}", NormalizedPath::canonical(&custom).as_str());

    let system = props(&[
        (HOME_KEY, install.root_str()),
        (CONFIG_KEY, custom_url.clone()),
        ("apps.root", format!("{}/apps", install.root_str())),
    ]);
    let mut bootstrap = Bootstrap::new(system, install.root());
    let mut host = ProbeHost::probing(&["app.txt"]);

    bootstrap.run(LifecycleCommand::ConfigTest, &mut host, &[]).unwrap();

    assert_eq!(bootstrap.config().origin(), Some(&ConfigOrigin::Override(custom_url)));
    assert_eq!(host.probes[0].1.as_deref(), Some("app"));
}

#[test]
fn failure_leaves_no_usable_scopes() {
    let install = TestInstall::new();
    install.lib_dir();
    install.write_properties(concat!(
        "common.loader=${catalina.home}/lib\n",
        "shared.loader=${catalina.home}/lib/broken.jar\n",
    ));
    install.write_file("lib/broken.jar", "not an archive");

    let system = props(&[(HOME_KEY, install.root_str())]);
    let mut bootstrap = Bootstrap::new(system, install.root());
    let mut host = ProbeHost::default();

    let err = bootstrap.run(LifecycleCommand::Start, &mut host, &[]).unwrap_err();

    assert!(
        matches!(err, Error::ScopeConstructionFailed { ref layer, .. } if layer == "shared"),
        "got: {err}"
    );
    assert!(err.is_fatal());
    assert!(!host.started);
    assert_eq!(bootstrap.state(), BootstrapState::Failed);
    assert!(bootstrap.scopes().is_none());
}
