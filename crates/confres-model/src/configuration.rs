//! Configurations: named, ordered option collections

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::option::ConfigurationOption;
use crate::reference::GLOBAL_CONFIGURATION_PREFIX;

/// A named, ordered collection of options.
///
/// Option order is significant: it breaks priority ties during resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawConfiguration")]
pub struct Configuration {
    name: String,
    #[serde(rename = "configurationOptions")]
    options: Vec<ConfigurationOption>,
    #[serde(rename = "changeTime", skip_serializing_if = "Option::is_none")]
    change_time: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct RawConfiguration {
    name: String,
    #[serde(rename = "configurationOptions", default)]
    options: Vec<ConfigurationOption>,
    #[serde(rename = "changeTime", default)]
    change_time: Option<DateTime<Utc>>,
}

impl TryFrom<RawConfiguration> for Configuration {
    type Error = Error;

    fn try_from(raw: RawConfiguration) -> Result<Self> {
        let configuration = Self::new(raw.name, raw.options)?;
        Ok(match raw.change_time {
            Some(time) => configuration.with_change_time(time),
            None => configuration,
        })
    }
}

impl Configuration {
    /// Build a configuration. Options are not validated against each other.
    pub fn new(name: impl Into<String>, options: Vec<ConfigurationOption>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::EmptyName {
                kind: "Configuration",
            });
        }
        Ok(Self {
            name,
            options,
            change_time: None,
        })
    }

    pub fn with_change_time(mut self, change_time: DateTime<Utc>) -> Self {
        self.change_time = Some(change_time);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &[ConfigurationOption] {
        &self.options
    }

    pub fn change_time(&self) -> Option<DateTime<Utc>> {
        self.change_time
    }

    /// Look up an option by name
    pub fn option(&self, name: &str) -> Option<&ConfigurationOption> {
        self.options.iter().find(|o| o.name() == name)
    }

    /// Whether references may target this configuration
    pub fn is_global(&self) -> bool {
        self.name.starts_with(GLOBAL_CONFIGURATION_PREFIX)
    }
}
