//! [`ConfigDir`] builder for directory-backed repository tests.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

/// A temporary repository root: one subdirectory per configuration.
///
/// # Example
///
/// ```rust,no_run
/// use confres_test_utils::dir::ConfigDir;
///
/// let dir = ConfigDir::new();
/// dir.write("global", "cfg0.yaml", "name: cfg0\nparameters: {a: 1}\n");
/// ```
pub struct ConfigDir {
    temp_dir: TempDir,
}

impl Default for ConfigDir {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigDir {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write raw `content` to `<root>/<configuration>/<file>`.
    pub fn write(&self, configuration: &str, file: &str, content: &str) -> PathBuf {
        let dir = self.root().join(configuration);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(file);
        fs::write(&path, content).unwrap();
        path
    }

    /// Write `value` as pretty JSON to `<root>/<configuration>/<file>`.
    pub fn write_json(&self, configuration: &str, file: &str, value: &Value) -> PathBuf {
        let content = serde_json::to_string_pretty(value).unwrap();
        self.write(configuration, file, &content)
    }

    /// Create an empty configuration directory.
    pub fn mkdir(&self, configuration: &str) -> PathBuf {
        let dir = self.root().join(configuration);
        fs::create_dir_all(&dir).unwrap();
        dir
    }
}
