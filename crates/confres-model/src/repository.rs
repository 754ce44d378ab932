//! Repository collaborator: where configurations come from

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::configuration::Configuration;
use crate::error::Result;

/// Source of configurations.
///
/// Implementations may perform I/O and may fail transiently; callers
/// decide whether to retry.
pub trait ConfigurationRepository: Send + Sync {
    /// Fetch one configuration by exact name
    fn get(&self, name: &str) -> Result<Option<Configuration>>;

    /// Fetch every configuration whose name starts with `prefix`
    fn get_key_range(&self, prefix: &str) -> Result<Vec<Configuration>>;
}

impl<R: ConfigurationRepository + ?Sized> ConfigurationRepository for Arc<R> {
    fn get(&self, name: &str) -> Result<Option<Configuration>> {
        (**self).get(name)
    }

    fn get_key_range(&self, prefix: &str) -> Result<Vec<Configuration>> {
        (**self).get_key_range(prefix)
    }
}

/// Repository over configurations already held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryConfigurationRepository {
    configurations: BTreeMap<String, Configuration>,
}

impl InMemoryConfigurationRepository {
    /// Build from a list of configurations. The first of duplicate names wins.
    pub fn new(configurations: impl IntoIterator<Item = Configuration>) -> Self {
        let mut repository = Self::default();
        for configuration in configurations {
            repository.insert(configuration);
        }
        repository
    }

    /// Add a configuration unless one with the same name exists.
    ///
    /// Returns `true` when inserted.
    pub fn insert(&mut self, configuration: Configuration) -> bool {
        let name = configuration.name().to_string();
        if self.configurations.contains_key(&name) {
            tracing::warn!(%name, "Ignoring duplicate configuration");
            return false;
        }
        self.configurations.insert(name, configuration);
        true
    }

    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.configurations.keys().map(String::as_str)
    }

    /// Configurations in name order
    pub fn iter(&self) -> impl Iterator<Item = &Configuration> {
        self.configurations.values()
    }
}

impl ConfigurationRepository for InMemoryConfigurationRepository {
    fn get(&self, name: &str) -> Result<Option<Configuration>> {
        Ok(self.configurations.get(name).cloned())
    }

    fn get_key_range(&self, prefix: &str) -> Result<Vec<Configuration>> {
        Ok(self
            .configurations
            .range(prefix.to_string()..)
            .take_while(|(name, _)| name.starts_with(prefix))
            .map(|(_, configuration)| configuration.clone())
            .collect())
    }
}
