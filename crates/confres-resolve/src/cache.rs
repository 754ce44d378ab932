//! Per-configuration memoization of resolution results.
//!
//! A [`SelectorCache`] wraps one [`Configuration`] and remembers the tree
//! resolved for each selector set. Keys are order-independent and keep only
//! the first selector per criterion, as resolution does (see
//! [`selector_key`]). Entries expire after a fixed time and the entry count
//! is bounded; when full, expired entries are evicted first, then the least
//! recently used.
//!
//! Concurrent lookups of the same uncached key compute once: every caller
//! shares a per-key [`OnceCell`], and the map lock is released before the
//! computation starts so other keys are never blocked by it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use confres_model::{Configuration, ParameterTree, Selector, SelectorKey, selector_key};
use once_cell::sync::OnceCell;

use crate::error::Result;
use crate::resolver;

/// Expiration and size bounds of a [`SelectorCache`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    /// Age after which an entry is treated as absent
    pub expiration: Duration,
    /// Maximum number of entries; `0` disables caching
    pub max_entries: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            expiration: Duration::from_secs(24 * 60 * 60),
            max_entries: 100,
        }
    }
}

/// Hit and miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

struct CacheEntry {
    created: Instant,
    last_access: Instant,
    cell: Arc<OnceCell<ParameterTree>>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant, expiration: Duration) -> bool {
        now.duration_since(self.created) >= expiration
    }
}

/// Resolution cache for one configuration
pub struct SelectorCache {
    configuration: Arc<Configuration>,
    settings: CacheSettings,
    entries: Mutex<HashMap<SelectorKey, CacheEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl SelectorCache {
    pub fn new(
        configuration: impl Into<Arc<Configuration>>,
        expiration: Duration,
        max_entries: u64,
    ) -> Self {
        Self::with_settings(
            configuration,
            CacheSettings {
                expiration,
                max_entries,
            },
        )
    }

    pub fn with_settings(configuration: impl Into<Arc<Configuration>>, settings: CacheSettings) -> Self {
        Self {
            configuration: configuration.into(),
            settings,
            entries: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn configuration(&self) -> &Arc<Configuration> {
        &self.configuration
    }

    pub fn settings(&self) -> CacheSettings {
        self.settings
    }

    /// Resolve `selectors`, computing and caching on a miss.
    ///
    /// Failures are returned to the caller and not cached.
    pub fn get(&self, selectors: &[Selector]) -> Result<ParameterTree> {
        if self.settings.max_entries == 0 {
            self.misses.fetch_add(1, Ordering::Relaxed);
            return resolver::resolve(&self.configuration, selectors);
        }

        let key = selector_key(selectors);
        let cell = self.cell_for(&key);

        let mut computed = false;
        let outcome = cell.get_or_try_init(|| {
            computed = true;
            tracing::debug!(
                configuration = self.configuration.name(),
                "Selector cache miss"
            );
            resolver::resolve(&self.configuration, selectors)
        });

        match outcome {
            Ok(tree) => {
                let counter = if computed { &self.misses } else { &self.hits };
                counter.fetch_add(1, Ordering::Relaxed);
                Ok(tree.clone())
            }
            Err(e) => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                self.discard(&key, &cell);
                Err(e)
            }
        }
    }

    /// Number of entries currently held, including expired ones not yet evicted
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SelectorKey, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Find or create the cell for `key`, evicting as needed
    fn cell_for(&self, key: &SelectorKey) -> Arc<OnceCell<ParameterTree>> {
        let now = Instant::now();
        let mut entries = self.lock();

        if let Some(entry) = entries.get_mut(key) {
            if !entry.is_expired(now, self.settings.expiration) {
                entry.last_access = now;
                return Arc::clone(&entry.cell);
            }
            entries.remove(key);
        }

        let capacity = usize::try_from(self.settings.max_entries).unwrap_or(usize::MAX);
        if entries.len() >= capacity {
            let expiration = self.settings.expiration;
            entries.retain(|_, entry| !entry.is_expired(now, expiration));
        }
        while entries.len() >= capacity {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_access)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(oldest) => {
                    tracing::trace!(key = ?oldest.entries(), "Evicting least recently used entry");
                    entries.remove(&oldest);
                }
                None => break,
            }
        }

        let cell = Arc::new(OnceCell::new());
        entries.insert(
            key.clone(),
            CacheEntry {
                created: now,
                last_access: now,
                cell: Arc::clone(&cell),
            },
        );
        cell
    }

    /// Remove a failed entry, unless another caller already replaced or filled it
    fn discard(&self, key: &SelectorKey, cell: &Arc<OnceCell<ParameterTree>>) {
        let mut entries = self.lock();
        let stale = entries
            .get(key)
            .is_some_and(|entry| Arc::ptr_eq(&entry.cell, cell) && entry.cell.get().is_none());
        if stale {
            entries.remove(key);
        }
    }
}

impl std::fmt::Debug for SelectorCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectorCache")
            .field("configuration", &self.configuration.name())
            .field("settings", &self.settings)
            .field("entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confres_model::{ConfigurationOption, Constraint, Operator};
    use serde_json::json;

    fn configuration() -> Configuration {
        let options = ["a", "b", "c"]
            .into_iter()
            .map(|name| {
                let constraint =
                    Constraint::string("name", Operator::equal(false), [name], 1).unwrap();
                let parameters = json!({ "name": name }).as_object().cloned().unwrap();
                ConfigurationOption::new(name, vec![constraint], parameters).unwrap()
            })
            .collect();
        Configuration::new("cfg", options).unwrap()
    }

    #[test]
    fn test_hit_after_miss() {
        let cache = SelectorCache::new(configuration(), Duration::from_secs(60), 10);
        let selectors = [Selector::new("name", "a")];

        let first = cache.get(&selectors).unwrap();
        let second = cache.get(&selectors).unwrap();

        assert_eq!(first, second);
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failures_are_not_cached() {
        let cache = SelectorCache::new(configuration(), Duration::from_secs(60), 10);
        assert!(cache.get(&[Selector::new("name", "zzz")]).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_lru_eviction_keeps_bound() {
        let cache = SelectorCache::new(configuration(), Duration::from_secs(60), 2);

        for name in ["a", "b", "a", "c"] {
            cache.get(&[Selector::new("name", name)]).unwrap();
            std::thread::sleep(Duration::from_millis(2));
        }

        assert_eq!(cache.len(), 2);
        let misses = cache.stats().misses;
        cache.get(&[Selector::new("name", "a")]).unwrap();
        assert_eq!(cache.stats().misses, misses, "recently used entry was evicted");
    }

    #[test]
    fn test_zero_capacity_never_stores() {
        let cache = SelectorCache::new(configuration(), Duration::from_secs(60), 0);
        cache.get(&[Selector::new("name", "a")]).unwrap();
        cache.get(&[Selector::new("name", "a")]).unwrap();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().misses, 2);
    }
}
