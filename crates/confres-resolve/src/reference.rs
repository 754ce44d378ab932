//! Reference substitution over parameter trees
//!
//! Every map in a tree may carry `"$ref:<key>": [selectors]` entries. Each
//! one is replaced by the parameters the global configuration `<key>`
//! resolves to for those selectors. References at one level merge in key
//! order, later over earlier; ordinary fields at that level override
//! anything a reference brought in. Substituted content is itself scanned,
//! and a chain that comes back to a key still being expanded is an error.

use std::collections::HashMap;

use confres_model::{Configuration, ConfigurationReference, ParameterTree};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::source::ParameterSource;

/// Substitutes configuration references using a set of addressable sources
pub struct ReferenceResolver<'a, S> {
    configurations: &'a HashMap<String, S>,
}

impl<'a, S: ParameterSource> ReferenceResolver<'a, S> {
    pub fn new(configurations: &'a HashMap<String, S>) -> Self {
        Self { configurations }
    }

    /// Return `tree` with every reference substituted, at any depth.
    ///
    /// The input is not modified. A tree without references comes back equal
    /// to the input.
    pub fn resolve(&self, tree: &ParameterTree) -> Result<ParameterTree> {
        self.resolve_map(tree, &mut Vec::new())
    }

    /// Substitute references in the parameters of every option
    pub fn resolve_configuration(&self, configuration: &Configuration) -> Result<Configuration> {
        let options = configuration
            .options()
            .iter()
            .map(|option| Ok(option.with_parameters(self.resolve(option.parameters())?)))
            .collect::<Result<Vec<_>>>()?;

        let resolved = Configuration::new(configuration.name(), options)?;
        Ok(match configuration.change_time() {
            Some(time) => resolved.with_change_time(time),
            None => resolved,
        })
    }

    fn resolve_map(&self, map: &ParameterTree, chain: &mut Vec<String>) -> Result<ParameterTree> {
        let (mut references, fields): (Vec<_>, Vec<_>) = map
            .iter()
            .partition(|(key, _)| ConfigurationReference::is_reference_key(key));
        references.sort_by(|(a, _), (b, _)| a.cmp(b));

        let mut output = ParameterTree::new();
        for (field, value) in references {
            let reference = ConfigurationReference::from_entry(field, value)
                .and_then(ConfigurationReference::ensure_global)
                .map_err(|source| Error::InvalidReference {
                    reference: field.clone(),
                    source,
                })?;
            output.extend(self.expand(&reference, chain)?);
        }

        for (key, value) in fields {
            output.insert(key.clone(), self.resolve_value(value, chain)?);
        }
        Ok(output)
    }

    fn expand(
        &self,
        reference: &ConfigurationReference,
        chain: &mut Vec<String>,
    ) -> Result<ParameterTree> {
        let key = reference.key();
        if chain.iter().any(|k| k == key) {
            let mut cycle = chain.clone();
            cycle.push(key.to_string());
            return Err(Error::ReferenceCycle { chain: cycle });
        }

        let source =
            self.configurations
                .get(key)
                .ok_or_else(|| Error::ReferenceTargetNotFound {
                    reference: reference.to_string(),
                    key: key.to_string(),
                })?;

        let parameters = match source.resolve_parameters(reference.selectors()) {
            Ok(parameters) if !parameters.is_empty() => parameters,
            Ok(_) | Err(Error::NoMatchingOption { .. }) => {
                return Err(Error::EmptyReference {
                    reference: reference.to_string(),
                });
            }
            Err(e) => return Err(e),
        };
        tracing::debug!(%reference, fields = parameters.len(), "Substituting configuration reference");

        chain.push(key.to_string());
        let resolved = self.resolve_map(&parameters, chain);
        chain.pop();
        resolved
    }

    fn resolve_value(&self, value: &Value, chain: &mut Vec<String>) -> Result<Value> {
        match value {
            Value::Object(map) => self.resolve_map(map, chain).map(Value::Object),
            Value::Array(items) => items
                .iter()
                .map(|item| self.resolve_value(item, chain))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            other => Ok(other.clone()),
        }
    }
}
