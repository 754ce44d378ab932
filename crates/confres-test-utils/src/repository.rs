//! Repository doubles.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use confres_model::{
    Configuration, ConfigurationRepository, Error, InMemoryConfigurationRepository, Result,
};

/// In-memory repository that counts calls and can fail the first few.
pub struct FlakyRepository {
    inner: InMemoryConfigurationRepository,
    failures_left: Mutex<usize>,
    get_calls: AtomicUsize,
    range_calls: AtomicUsize,
}

impl FlakyRepository {
    /// Repository that never fails
    pub fn new(configurations: impl IntoIterator<Item = Configuration>) -> Self {
        Self::failing(configurations, 0)
    }

    /// Repository whose first `failures` calls return an error
    pub fn failing(configurations: impl IntoIterator<Item = Configuration>, failures: usize) -> Self {
        Self {
            inner: InMemoryConfigurationRepository::new(configurations),
            failures_left: Mutex::new(failures),
            get_calls: AtomicUsize::new(0),
            range_calls: AtomicUsize::new(0),
        }
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn range_calls(&self) -> usize {
        self.range_calls.load(Ordering::SeqCst)
    }

    fn maybe_fail(&self) -> Result<()> {
        let mut left = self.failures_left.lock().unwrap();
        if *left > 0 {
            *left -= 1;
            return Err(Error::repository("repository unavailable"));
        }
        Ok(())
    }
}

impl ConfigurationRepository for FlakyRepository {
    fn get(&self, name: &str) -> Result<Option<Configuration>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_fail()?;
        self.inner.get(name)
    }

    fn get_key_range(&self, prefix: &str) -> Result<Vec<Configuration>> {
        self.range_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_fail()?;
        self.inner.get_key_range(prefix)
    }
}
