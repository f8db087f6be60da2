//! Tests for building loading scopes from repository lists

use std::sync::Arc;

use catalina_core::scope::{
    FsScopeFactory, LoadingScope, Repository, RepositoryKind, ScopeBuilder,
};
use catalina_core::{BaseDirectories, Error, PlaceholderResolver, ProcessConfig, SystemProperties};
use catalina_fs::NormalizedPath;
use catalina_test_utils::TestInstall;
use pretty_assertions::assert_eq;

struct Fixture {
    install: TestInstall,
    dirs: BaseDirectories,
    system: SystemProperties,
}

impl Fixture {
    fn new() -> Self {
        let install = TestInstall::new();
        let root = NormalizedPath::canonical(install.root());
        Self {
            install,
            dirs: BaseDirectories::new(root.clone(), root),
            system: SystemProperties::new(),
        }
    }

    fn build(
        &self,
        config: &ProcessConfig,
        name: &str,
        parent: Option<Arc<LoadingScope>>,
    ) -> catalina_core::Result<Option<Arc<LoadingScope>>> {
        let resolver = PlaceholderResolver::new(&self.dirs, config, &self.system);
        ScopeBuilder::new(resolver, &FsScopeFactory).build(name, parent)
    }
}

fn config(pairs: &[(&str, &str)]) -> ProcessConfig {
    pairs.iter().copied().collect()
}

#[test]
fn absent_or_empty_list_passes_parent_through() {
    let fixture = Fixture::new();
    let parent = LoadingScope::embedded();

    let absent = fixture.build(&config(&[]), "server", Some(parent.clone())).unwrap();
    let empty = fixture
        .build(&config(&[("server.loader", "")]), "server", Some(parent.clone()))
        .unwrap();

    assert!(Arc::ptr_eq(&absent.unwrap(), &parent));
    assert!(Arc::ptr_eq(&empty.unwrap(), &parent));
    assert!(fixture.build(&config(&[]), "common", None).unwrap().is_none());
}

#[test]
fn builds_directory_archive_and_archive_set_in_order() {
    let fixture = Fixture::new();
    fixture.install.write_file("classes/app.properties", "from=classes");
    fixture.install.write_jar("lib/b.jar", &[("b.txt", "b")]);
    fixture.install.write_jar("lib/a.jar", &[("a.txt", "a"), ("app.properties", "from=a")]);
    fixture.install.write_file("lib/notes.txt", "not an archive");
    fixture.install.write_jar("extra/single.jar", &[("single.txt", "single")]);

    let cfg = config(&[(
        "common.loader",
        r#""${catalina.base}/classes","${catalina.home}/lib/*.jar",${catalina.home}/extra/single.jar"#,
    )]);
    let scope = fixture.build(&cfg, "common", None).unwrap().unwrap();

    let kinds: Vec<RepositoryKind> = scope.entries().iter().map(|e| e.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            RepositoryKind::Directory,
            RepositoryKind::ArchiveSet,
            RepositoryKind::Archive
        ]
    );
    // Archive sets expand to one repository per member, sorted by name.
    assert_eq!(scope.repositories().len(), 4);
    match &scope.repositories()[1] {
        Repository::Archive(archive) => assert!(archive.path().as_str().ends_with("/lib/a.jar")),
        other => panic!("expected archive, got {other:?}"),
    }

    let first = scope.resolve("app.properties").unwrap().unwrap();
    assert_eq!(first.bytes(), b"from=classes");
    assert_eq!(scope.resolve("b.txt").unwrap().unwrap().bytes(), b"b");
    assert_eq!(scope.resolve("single.txt").unwrap().unwrap().bytes(), b"single");
    assert!(scope.resolve("notes.txt").unwrap().is_none());
}

#[test]
fn empty_archive_set_is_allowed() {
    let fixture = Fixture::new();
    fixture.install.lib_dir();

    let scope = fixture
        .build(&config(&[("common.loader", "${catalina.home}/lib/*.jar")]), "common", None)
        .unwrap()
        .unwrap();

    assert_eq!(scope.entries().len(), 1);
    assert!(scope.repositories().is_empty());
}

#[test]
fn missing_directory_fails_scope_construction() {
    let fixture = Fixture::new();

    let err = fixture
        .build(&config(&[("common.loader", "${catalina.home}/missing")]), "common", None)
        .unwrap_err();

    match err {
        Error::ScopeConstructionFailed { layer, location, .. } => {
            assert_eq!(layer, "common");
            assert!(location.ends_with("/missing"), "location: {location}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn corrupt_archive_fails_scope_construction() {
    let fixture = Fixture::new();
    fixture.install.write_file("lib/broken.jar", "not a zip");

    let err = fixture
        .build(&config(&[("common.loader", "${catalina.home}/lib/broken.jar")]), "common", None)
        .unwrap_err();

    assert!(matches!(err, Error::ScopeConstructionFailed { .. }), "got: {err}");
    assert!(err.is_fatal());
}

#[test]
fn malformed_list_is_rejected_before_filesystem_access() {
    let fixture = Fixture::new();

    let err = fixture
        .build(&config(&[("common.loader", r#"/does/not/exist,/a"b"#)]), "common", None)
        .unwrap_err();

    assert!(matches!(err, Error::MalformedPathList { .. }), "got: {err}");
}

#[test]
fn remote_locators_are_recorded_and_file_locators_opened() {
    let fixture = Fixture::new();
    let dir = fixture.install.mkdir("remote-local");
    std::fs::write(dir.join("local.txt"), "local").unwrap();
    let file_url = url::Url::from_directory_path(&dir).unwrap();

    let list = format!("https://repo.invalid/lib/,{file_url}");
    let cfg = config(&[("common.loader", list.as_str())]);
    let scope = fixture.build(&cfg, "common", None).unwrap().unwrap();

    assert!(scope
        .entries()
        .iter()
        .all(|e| e.kind() == RepositoryKind::RemoteLocator));
    assert!(matches!(scope.repositories()[0], Repository::Remote { .. }));
    assert!(matches!(scope.repositories()[1], Repository::Directory { .. }));
    assert_eq!(scope.resolve("local.txt").unwrap().unwrap().bytes(), b"local");
}

#[test]
fn sibling_scopes_are_isolated() {
    let fixture = Fixture::new();
    fixture.install.write_jar("common/base.jar", &[("common.txt", "common")]);
    fixture.install.write_jar("server/internal.jar", &[("server.txt", "server")]);
    fixture.install.write_jar("shared/app.jar", &[("shared.txt", "shared")]);

    let cfg = config(&[
        ("common.loader", "${catalina.home}/common/*.jar"),
        ("server.loader", "${catalina.home}/server/*.jar"),
        ("shared.loader", "${catalina.home}/shared/*.jar"),
    ]);
    let common = fixture
        .build(&cfg, "common", Some(LoadingScope::embedded()))
        .unwrap()
        .unwrap();
    let server = fixture.build(&cfg, "server", Some(common.clone())).unwrap().unwrap();
    let shared = fixture.build(&cfg, "shared", Some(common.clone())).unwrap().unwrap();

    assert_eq!(server.resolve("common.txt").unwrap().unwrap().scope(), "common");
    assert_eq!(shared.resolve("common.txt").unwrap().unwrap().scope(), "common");
    assert!(shared.resolve("server.txt").unwrap().is_none());
    assert!(server.resolve("shared.txt").unwrap().is_none());
    assert!(common.resolve("server.txt").unwrap().is_none());
    assert_eq!(shared.to_string(), "shared -> common -> embedded");
}

#[test]
fn file_locator_to_archive_set_opens_every_member() {
    let fixture = Fixture::new();
    fixture.install.write_jar("plugins/one.jar", &[("one.txt", "1")]);
    fixture.install.write_jar("plugins/two.jar", &[("two.txt", "2")]);
    let dir_url = url::Url::from_directory_path(fixture.install.path("plugins")).unwrap();

    let list = format!("{dir_url}*.jar");
    let scope = fixture
        .build(&config(&[("common.loader", list.as_str())]), "common", None)
        .unwrap()
        .unwrap();

    assert_eq!(scope.entries()[0].kind(), RepositoryKind::RemoteLocator);
    assert_eq!(scope.repositories().len(), 2);
    assert_eq!(scope.resolve("two.txt").unwrap().unwrap().bytes(), b"2");
}

#[test]
fn bare_archive_set_uses_working_directory() {
    let fixture = Fixture::new();

    let scope = fixture
        .build(&config(&[("common.loader", "*.jar")]), "common", None)
        .unwrap()
        .unwrap();

    assert_eq!(scope.entries()[0].kind(), RepositoryKind::ArchiveSet);
    assert_eq!(scope.entries()[0].location(), "");
}
