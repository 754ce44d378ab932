//! Configuration options: named constraint bundles with a parameter tree

use serde::{Deserialize, Serialize};

use crate::ParameterTree;
use crate::constraint::Constraint;
use crate::error::{Error, Result};

/// A named bundle of constraints plus the parameters it yields when chosen.
///
/// Criteria are unique within one option. Construction and deserialization
/// both enforce this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOption")]
pub struct ConfigurationOption {
    name: String,
    constraints: Vec<Constraint>,
    parameters: ParameterTree,
}

#[derive(Deserialize)]
struct RawOption {
    name: String,
    #[serde(default)]
    constraints: Vec<Constraint>,
    #[serde(default)]
    parameters: ParameterTree,
}

impl TryFrom<RawOption> for ConfigurationOption {
    type Error = Error;

    fn try_from(raw: RawOption) -> Result<Self> {
        Self::new(raw.name, raw.constraints, raw.parameters)
    }
}

impl ConfigurationOption {
    pub fn new(
        name: impl Into<String>,
        constraints: Vec<Constraint>,
        parameters: ParameterTree,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::EmptyName {
                kind: "ConfigurationOption",
            });
        }

        let duplicates = duplicated_criteria(&constraints);
        if !duplicates.is_empty() {
            return Err(Error::DuplicateCriteria {
                option: name,
                criteria: duplicates,
            });
        }

        Ok(Self {
            name,
            constraints,
            parameters,
        })
    }

    /// Option without parameters
    pub fn with_constraints(name: impl Into<String>, constraints: Vec<Constraint>) -> Result<Self> {
        Self::new(name, constraints, ParameterTree::new())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn parameters(&self) -> &ParameterTree {
        &self.parameters
    }

    /// Same constraints, new parameters
    pub fn with_parameters(&self, parameters: ParameterTree) -> Self {
        Self {
            name: self.name.clone(),
            constraints: self.constraints.clone(),
            parameters,
        }
    }

    /// Sum of constraint priorities, saturating at the `i64` bounds
    pub fn priority(&self) -> i64 {
        self.constraints
            .iter()
            .fold(0i64, |total, c| total.saturating_add(c.priority()))
    }
}

/// Criteria that appear more than once, in order of first appearance
fn duplicated_criteria(constraints: &[Constraint]) -> Vec<String> {
    let mut duplicates: Vec<String> = Vec::new();
    for (i, constraint) in constraints.iter().enumerate() {
        let criterion = constraint.criterion();
        let repeated = constraints[..i].iter().any(|c| c.criterion() == criterion);
        if repeated && !duplicates.iter().any(|d| d == criterion) {
            duplicates.push(criterion.to_string());
        }
    }
    duplicates
}
