//! Resolution API over a configuration repository
//!
//! A [`ConfigurationConsumer`] loads configurations from a repository once,
//! keeps a [`SelectorCache`] per configuration, and substitutes references
//! against the global configurations on every call.
//!
//! # Example
//!
//! ```ignore
//! use confres_model::{InMemoryConfigurationRepository, Selector};
//! use confres_resolve::ConfigurationConsumer;
//!
//! let consumer = ConfigurationConsumer::builder(repository)
//!     .configuration_name_prefixes(["component"])
//!     .build()?;
//! let parameters = consumer.resolve("component", &[Selector::new("sta", "ASAR")])?;
//! ```

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use confres_model::{
    Configuration, ConfigurationRepository, GLOBAL_CONFIGURATION_PREFIX, ParameterTree, Selector,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cache::{CacheSettings, SelectorCache};
use crate::error::{Error, Result};
use crate::reference::ReferenceResolver;
use crate::retry::RetryConfig;

type CacheMap = HashMap<String, Arc<SelectorCache>>;

/// Builder for [`ConfigurationConsumer`]
pub struct ConfigurationConsumerBuilder {
    repository: Box<dyn ConfigurationRepository>,
    prefixes: Vec<String>,
    cache: CacheSettings,
    retry: RetryConfig,
}

impl ConfigurationConsumerBuilder {
    /// Name prefixes to preload. Global configurations are always loaded.
    pub fn configuration_name_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn cache_expiration(mut self, expiration: Duration) -> Self {
        self.cache.expiration = expiration;
        self
    }

    pub fn cache_max_entries(mut self, max_entries: u64) -> Self {
        self.cache.max_entries = max_entries;
        self
    }

    pub fn cache_settings(mut self, settings: CacheSettings) -> Self {
        self.cache = settings;
        self
    }

    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Load every matching configuration and build the consumer
    pub fn build(self) -> Result<ConfigurationConsumer> {
        let mut prefixes = vec![GLOBAL_CONFIGURATION_PREFIX.to_string()];
        for prefix in self.prefixes {
            if !prefixes.contains(&prefix) {
                prefixes.push(prefix);
            }
        }

        let mut caches = CacheMap::new();
        for prefix in &prefixes {
            let configurations = self
                .retry
                .run("get_key_range", || self.repository.get_key_range(prefix))?;
            tracing::debug!(%prefix, count = configurations.len(), "Fetched configurations");

            for configuration in configurations {
                if caches.contains_key(configuration.name()) {
                    tracing::warn!(name = configuration.name(), "Ignoring duplicate configuration");
                    continue;
                }
                caches.insert(
                    configuration.name().to_string(),
                    Arc::new(SelectorCache::with_settings(configuration, self.cache)),
                );
            }
        }
        tracing::info!(configurations = caches.len(), ?prefixes, "Loaded configurations");

        Ok(ConfigurationConsumer {
            repository: self.repository,
            cache: self.cache,
            retry: self.retry,
            caches: RwLock::new(caches),
        })
    }
}

/// Resolves configurations by name, with caching and reference substitution
pub struct ConfigurationConsumer {
    repository: Box<dyn ConfigurationRepository>,
    cache: CacheSettings,
    retry: RetryConfig,
    caches: RwLock<CacheMap>,
}

impl ConfigurationConsumer {
    pub fn builder(repository: impl ConfigurationRepository + 'static) -> ConfigurationConsumerBuilder {
        ConfigurationConsumerBuilder {
            repository: Box::new(repository),
            prefixes: Vec::new(),
            cache: CacheSettings::default(),
            retry: RetryConfig::default(),
        }
    }

    /// Resolve `name` for `selectors` with every reference substituted
    pub fn resolve(&self, name: &str, selectors: &[Selector]) -> Result<ParameterTree> {
        let parameters = self.cache_for(name)?.get(selectors)?;

        let caches = self.caches.read().unwrap_or_else(PoisonError::into_inner);
        ReferenceResolver::new(&*caches).resolve(&parameters)
    }

    /// Resolve and deserialize into `T`
    pub fn resolve_as<T: DeserializeOwned>(&self, name: &str, selectors: &[Selector]) -> Result<T> {
        let parameters = self.resolve(name, selectors)?;
        serde_json::from_value(Value::Object(parameters)).map_err(|source| Error::Deserialize {
            configuration: name.to_string(),
            source,
        })
    }

    /// Resolve, deserialize into `T`, then map with `f`
    pub fn resolve_with<T, R, F>(&self, name: &str, selectors: &[Selector], f: F) -> Result<R>
    where
        T: DeserializeOwned,
        F: FnOnce(T) -> R,
    {
        self.resolve_as(name, selectors).map(f)
    }

    /// Names of the configurations loaded so far, sorted
    pub fn configuration_names(&self) -> Vec<String> {
        let caches = self.caches.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = caches.keys().cloned().collect();
        names.sort();
        names
    }

    /// The loaded configuration called `name`, if any
    pub fn configuration(&self, name: &str) -> Option<Arc<Configuration>> {
        let caches = self.caches.read().unwrap_or_else(PoisonError::into_inner);
        caches.get(name).map(|cache| Arc::clone(cache.configuration()))
    }

    /// Cache for `name`, fetching the configuration on first use
    fn cache_for(&self, name: &str) -> Result<Arc<SelectorCache>> {
        {
            let caches = self.caches.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(cache) = caches.get(name) {
                return Ok(Arc::clone(cache));
            }
        }

        let configuration = self
            .retry
            .run("get", || self.repository.get(name))?
            .ok_or_else(|| Error::ConfigurationNotFound {
                name: name.to_string(),
            })?;
        tracing::debug!(name, "Fetched configuration on demand");

        let mut caches = self.caches.write().unwrap_or_else(PoisonError::into_inner);
        let cache = caches
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(SelectorCache::with_settings(configuration, self.cache)));
        Ok(Arc::clone(cache))
    }
}
