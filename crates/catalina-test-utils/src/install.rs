//! [`TestInstall`] builder for bootstrap test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use catalina_fs::InstallPath;
use tempfile::TempDir;

use crate::archive::write_archive;

/// A temporary install tree with helpers for laying out `bin/`, `conf/` and
/// `lib/`.
///
/// # Example
///
/// ```rust,no_run
/// use catalina_test_utils::TestInstall;
///
/// let install = TestInstall::new();
/// install.mark_bin();
/// install.write_properties("common.loader=\"${catalina.home}/lib\"\n");
/// install.write_jar("lib/app.jar", &[("app.txt", "hello")]);
/// ```
pub struct TestInstall {
    temp_dir: TempDir,
}

impl Default for TestInstall {
    fn default() -> Self {
        Self::new()
    }
}

impl TestInstall {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Root of the install tree.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// `root` joined with `relative`.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Root as a forward-slash string, suitable for property values.
    pub fn root_str(&self) -> String {
        self.root().to_string_lossy().replace('\\', "/")
    }

    /// Create `relative` and any missing parents.
    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let dir = self.path(relative);
        fs::create_dir_all(&dir)
            .unwrap_or_else(|e| panic!("TestInstall::mkdir: {}: {e}", dir.display()));
        dir
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let file = self.path(relative);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&file, content)
            .unwrap_or_else(|e| panic!("TestInstall::write_file: {}: {e}", file.display()));
        file
    }

    /// Write `conf/catalina.properties`.
    pub fn write_properties(&self, content: &str) -> PathBuf {
        let relative = format!("{}/{}", InstallPath::ConfDir, InstallPath::PropertiesFile);
        self.write_file(&relative, content)
    }

    /// Write an archive at `relative` holding `entries`.
    pub fn write_jar(&self, relative: &str, entries: &[(&str, &str)]) -> PathBuf {
        let jar = self.path(relative);
        write_archive(&jar, entries);
        jar
    }

    /// Create the empty `lib` directory. Returns its path.
    pub fn lib_dir(&self) -> PathBuf {
        self.mkdir(InstallPath::LibDir.as_str())
    }

    /// Create `bin/bootstrap.jar` so `bin/` is recognized as the launch
    /// directory. Returns the `bin` directory.
    pub fn mark_bin(&self) -> PathBuf {
        let marker = format!("{}/{}", InstallPath::BinDir, InstallPath::MarkerArchive);
        self.write_jar(&marker, &[("META-INF/MANIFEST.MF", "Manifest-Version: 1.0\n")]);
        self.path(InstallPath::BinDir.as_str())
    }

    /// Assert that `relative` exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, relative: &str) {
        let full_path = self.path(relative);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }
}
