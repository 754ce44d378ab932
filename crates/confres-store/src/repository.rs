//! Directory-backed configuration repository
//!
//! ```text
//! root/
//!   global.filters/
//!     filter1.yaml
//!     filter2.json
//!   component/
//!     options.toml
//! ```
//!
//! Each subdirectory of the root is one configuration named after the
//! directory. Each supported file in it holds one option or a list of
//! options; options are ordered by file name, then by position in the file.
//! Files that fail to load are logged and skipped.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use confres_model::{
    Configuration, ConfigurationOption, ConfigurationRepository, InMemoryConfigurationRepository,
};

use crate::error::{Error, Result};
use crate::format::{DocumentFormat, load_options};

/// Configurations loaded once from a directory tree
#[derive(Debug, Clone)]
pub struct FileConfigurationRepository {
    root: PathBuf,
    configurations: InMemoryConfigurationRepository,
}

impl FileConfigurationRepository {
    /// Load every configuration under `root`
    pub fn load(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(Error::RootNotFound {
                path: root.to_path_buf(),
            });
        }

        let mut configurations = InMemoryConfigurationRepository::default();
        for dir in sorted_entries(root)? {
            if !dir.is_dir() {
                continue;
            }
            let Some(name) = dir.file_name().and_then(|n| n.to_str()) else {
                tracing::warn!(?dir, "Skipping directory with non UTF-8 name");
                continue;
            };
            let configuration = load_configuration(name, &dir)?;
            configurations.insert(configuration);
        }

        tracing::info!(
            root = %root.display(),
            configurations = configurations.len(),
            "Loaded configuration repository"
        );
        Ok(Self {
            root: root.to_path_buf(),
            configurations,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }

    /// Loaded configurations in name order
    pub fn configurations(&self) -> impl Iterator<Item = &Configuration> {
        self.configurations.iter()
    }
}

impl ConfigurationRepository for FileConfigurationRepository {
    fn get(&self, name: &str) -> confres_model::Result<Option<Configuration>> {
        self.configurations.get(name)
    }

    fn get_key_range(&self, prefix: &str) -> confres_model::Result<Vec<Configuration>> {
        self.configurations.get_key_range(prefix)
    }
}

/// Build one configuration from the option files in `dir`
fn load_configuration(name: &str, dir: &Path) -> Result<Configuration> {
    let mut options: Vec<ConfigurationOption> = Vec::new();
    let mut change_time: Option<DateTime<Utc>> = None;

    for path in sorted_entries(dir)? {
        if !path.is_file() {
            continue;
        }
        if DocumentFormat::from_path(&path).is_err() {
            tracing::trace!(?path, "Ignoring file with unsupported extension");
            continue;
        }

        match load_options(&path) {
            Ok(loaded) => {
                tracing::debug!(?path, count = loaded.len(), "Loaded configuration options");
                options.extend(loaded);
                if let Some(modified) = modified_time(&path) {
                    change_time = Some(change_time.map_or(modified, |t| t.max(modified)));
                }
            }
            Err(e) => {
                // Keep loading the remaining files
                tracing::warn!("Failed to load {:?}: {}", path, e);
            }
        }
    }

    let configuration = Configuration::new(name, options)?;
    Ok(match change_time {
        Some(time) => configuration.with_change_time(time),
        None => configuration,
    })
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    let mut paths: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
    paths.sort();
    Ok(paths)
}

fn modified_time(path: &Path) -> Option<DateTime<Utc>> {
    fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .ok()
        .map(DateTime::<Utc>::from)
}
