//! Configuration references embedded in parameter trees
//!
//! A reference is a map entry whose key is [`REF_COMMAND`] followed by the
//! target configuration key, and whose value is the selector list used to
//! resolve that target:
//!
//! ```json
//! { "$ref:global.filters": [ { "criterion": "name", "value": "filter4-8" } ] }
//! ```

use std::fmt;

use serde_json::Value;

use crate::ParameterTree;
use crate::error::{Error, Result};
use crate::selector::Selector;

/// Marker prefix for reference keys
pub const REF_COMMAND: &str = "$ref:";

/// Key prefix every reference target must carry
pub const GLOBAL_CONFIGURATION_PREFIX: &str = "global";

/// A request for another configuration's resolved parameters
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationReference {
    key: String,
    selectors: Vec<Selector>,
}

impl ConfigurationReference {
    pub fn new(key: impl Into<String>, selectors: Vec<Selector>) -> Self {
        Self {
            key: key.into(),
            selectors,
        }
    }

    /// Whether a parameter map key marks a reference
    pub fn is_reference_key(field: &str) -> bool {
        field.starts_with(REF_COMMAND)
    }

    /// Decode a `"$ref:<key>": [selectors]` entry
    pub fn from_entry(field: &str, value: &Value) -> Result<Self> {
        let key = field
            .strip_prefix(REF_COMMAND)
            .ok_or_else(|| Error::MalformedReference {
                key: field.to_string(),
                message: format!("key does not start with \"{REF_COMMAND}\""),
            })?;
        if key.is_empty() {
            return Err(Error::MalformedReference {
                key: field.to_string(),
                message: "missing configuration key".to_string(),
            });
        }
        if !value.is_array() {
            return Err(Error::MalformedReference {
                key: key.to_string(),
                message: "value must be a list of selectors".to_string(),
            });
        }

        let selectors: Vec<Selector> =
            serde_json::from_value(value.clone()).map_err(|e| Error::MalformedReference {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self::new(key, selectors))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    /// The map key this reference is stored under
    pub fn field_key(&self) -> String {
        format!("{REF_COMMAND}{}", self.key)
    }

    /// The `(key, value)` map entry for this reference
    pub fn to_entry(&self) -> (String, Value) {
        let selectors = self.selectors.iter().map(Selector::to_json).collect();
        (self.field_key(), Value::Array(selectors))
    }

    /// A parameter map holding only this reference
    pub fn to_field_map(&self) -> ParameterTree {
        let (key, value) = self.to_entry();
        let mut map = ParameterTree::new();
        map.insert(key, value);
        map
    }

    pub fn is_global(&self) -> bool {
        self.key.starts_with(GLOBAL_CONFIGURATION_PREFIX)
    }

    /// Reject references that point outside the global configurations
    pub fn ensure_global(self) -> Result<Self> {
        if self.is_global() {
            Ok(self)
        } else {
            Err(Error::InvalidReferencePrefix {
                key: self.key,
                prefix: GLOBAL_CONFIGURATION_PREFIX,
            })
        }
    }
}

impl fmt::Display for ConfigurationReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}[", REF_COMMAND, self.key)?;
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{selector}")?;
        }
        f.write_str("]")
    }
}
