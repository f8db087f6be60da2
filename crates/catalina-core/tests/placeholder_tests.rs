//! Property tests for placeholder substitution

use catalina_core::{BaseDirectories, PlaceholderResolver, ProcessConfig, SystemProperties};
use proptest::prelude::*;

fn fixture() -> (BaseDirectories, ProcessConfig, SystemProperties) {
    let dirs = BaseDirectories::new("/opt/home", "/srv/base");
    let config: ProcessConfig = [("app.dir", "/apps"), ("lib", "lib")].into_iter().collect();
    let system: SystemProperties = [("user.dir", "/work")].into_iter().collect();
    (dirs, config, system)
}

proptest! {
    #[test]
    fn text_without_markers_is_unchanged(raw in "[^$]*") {
        let (dirs, config, system) = fixture();
        let resolver = PlaceholderResolver::new(&dirs, &config, &system);
        prop_assert_eq!(resolver.resolve(&raw), raw);
    }

    #[test]
    fn resolution_is_idempotent(
        parts in prop::collection::vec(
            prop_oneof![
                Just("${catalina.home}".to_string()),
                Just("${catalina.base}".to_string()),
                Just("${app.dir}".to_string()),
                Just("${user.dir}".to_string()),
                Just("${unknown}".to_string()),
                Just("${".to_string()),
                "[a-z/,.*\"]{0,6}",
            ],
            0..8,
        )
    ) {
        let (dirs, config, system) = fixture();
        let resolver = PlaceholderResolver::new(&dirs, &config, &system);
        let raw = parts.concat();
        let once = resolver.resolve(&raw);
        prop_assert_eq!(resolver.resolve(&once), once);
    }

    #[test]
    fn known_names_never_survive(prefix in "[a-z/]{0,8}", suffix in "[a-z/]{0,8}") {
        let (dirs, config, system) = fixture();
        let resolver = PlaceholderResolver::new(&dirs, &config, &system);
        let resolved = resolver.resolve(&format!("{prefix}${{catalina.base}}{suffix}"));
        prop_assert_eq!(resolved, format!("{prefix}/srv/base{suffix}"));
    }
}
