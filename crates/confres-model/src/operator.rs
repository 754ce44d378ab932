//! Comparison operators

use std::fmt;

use serde::{Deserialize, Serialize};

/// Comparison mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatorType {
    /// Exact (or fuzzy numeric) equality
    #[serde(rename = "EQ")]
    Eq,
    /// Set or range membership
    #[serde(rename = "IN")]
    In,
}

impl fmt::Display for OperatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorType::Eq => write!(f, "EQ"),
            OperatorType::In => write!(f, "IN"),
        }
    }
}

/// Operator type plus a negation flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operator {
    #[serde(rename = "type")]
    kind: OperatorType,
    #[serde(default)]
    negated: bool,
}

impl Operator {
    pub fn new(kind: OperatorType, negated: bool) -> Self {
        Self { kind, negated }
    }

    /// `EQ` operator
    pub fn equal(negated: bool) -> Self {
        Self::new(OperatorType::Eq, negated)
    }

    /// `IN` operator
    pub fn member(negated: bool) -> Self {
        Self::new(OperatorType::In, negated)
    }

    pub fn kind(&self) -> OperatorType {
        self.kind
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Apply negation to a raw comparison result
    pub fn truth(&self, outcome: bool) -> bool {
        outcome != self.negated
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "NOT {}", self.kind)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}
