//! Resolve one configuration and print the result

use std::path::Path;
use std::time::Duration;

use confres_model::Selector;
use confres_resolve::{ConfigurationConsumer, RetryConfig};
use confres_store::FileConfigurationRepository;
use serde_json::Value;

use crate::error::Result;

/// Tunables for the resolve command
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    pub prefixes: Vec<String>,
    pub cache_max_entries: u64,
    pub cache_expiration: Duration,
    pub retry_attempts: u32,
}

/// Run the resolve command
pub fn run_resolve(
    root: &Path,
    name: &str,
    selectors: &[Selector],
    options: &ResolveOptions,
) -> Result<()> {
    let repository = FileConfigurationRepository::load(root)?;
    let retry = RetryConfig {
        max_attempts: options.retry_attempts,
        ..RetryConfig::default()
    };

    let consumer = ConfigurationConsumer::builder(repository)
        .configuration_name_prefixes(options.prefixes.iter().cloned())
        .cache_max_entries(options.cache_max_entries)
        .cache_expiration(options.cache_expiration)
        .retry(retry)
        .build()?;

    tracing::debug!(name, selectors = selectors.len(), "Resolving configuration");
    let parameters = consumer.resolve(name, selectors)?;
    println!("{}", serde_json::to_string_pretty(&Value::Object(parameters))?);
    Ok(())
}
