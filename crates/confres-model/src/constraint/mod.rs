//! Constraints: typed rules a selector value must satisfy
//!
//! A [`Constraint`] binds one criterion to an [`Operator`], a comparison
//! payload ([`ConstraintKind`]) and a priority. Evaluation is a single
//! exhaustive match over the payload kind.

mod range;
mod wire;

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::operator::{Operator, OperatorType};
use crate::phase::PhaseType;
use crate::selector::SelectorValue;

pub use range::{NumericRange, TimeOfDayRange, TimeOfYearRange, parse_instant, parse_time_of_day};

/// Absolute tolerance for `NumericScalar` equality
pub const NUMERIC_TOLERANCE: f64 = 1e-16;

/// Criterion carried by the default constraint
pub const DEFAULT_CRITERION: &str = "$default";

/// Comparison payload of a constraint
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintKind {
    Default,
    Wildcard,
    Boolean(bool),
    NumericScalar(f64),
    NumericRange(NumericRange),
    Phase(BTreeSet<PhaseType>),
    String(BTreeSet<String>),
    TimeOfDayRange(TimeOfDayRange),
    TimeOfYearRange(TimeOfYearRange),
}

impl ConstraintKind {
    pub fn name(&self) -> &'static str {
        match self {
            ConstraintKind::Default => "Default",
            ConstraintKind::Wildcard => "Wildcard",
            ConstraintKind::Boolean(_) => "Boolean",
            ConstraintKind::NumericScalar(_) => "NumericScalar",
            ConstraintKind::NumericRange(_) => "NumericRange",
            ConstraintKind::Phase(_) => "Phase",
            ConstraintKind::String(_) => "String",
            ConstraintKind::TimeOfDayRange(_) => "TimeOfDayRange",
            ConstraintKind::TimeOfYearRange(_) => "TimeOfYearRange",
        }
    }

    /// Whether this payload can be evaluated with `operator`
    pub fn supports(&self, operator: Operator) -> bool {
        match self {
            ConstraintKind::Default | ConstraintKind::Wildcard => {
                operator == Operator::equal(false)
            }
            ConstraintKind::Boolean(_) | ConstraintKind::NumericScalar(_) => {
                operator.kind() == OperatorType::Eq
            }
            ConstraintKind::NumericRange(_)
            | ConstraintKind::TimeOfDayRange(_)
            | ConstraintKind::TimeOfYearRange(_) => operator.kind() == OperatorType::In,
            ConstraintKind::Phase(_) | ConstraintKind::String(_) => true,
        }
    }
}

/// A typed rule on one criterion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "wire::WireConstraint", into = "wire::WireConstraint")]
pub struct Constraint {
    criterion: String,
    operator: Operator,
    priority: i64,
    kind: ConstraintKind,
}

impl Constraint {
    /// Build a constraint, rejecting operators the payload cannot evaluate.
    ///
    /// A `Default` payload always yields [`Constraint::default`]; its
    /// criterion and priority are fixed.
    pub fn new(
        criterion: impl Into<String>,
        operator: Operator,
        priority: i64,
        kind: ConstraintKind,
    ) -> Result<Self> {
        if !kind.supports(operator) {
            return Err(Error::UnsupportedOperator {
                constraint: kind.name(),
                operator,
            });
        }
        if kind == ConstraintKind::Default {
            return Ok(Self::default());
        }

        let criterion = criterion.into();
        if criterion.is_empty() {
            return Err(Error::EmptyCriterion {
                constraint: kind.name(),
            });
        }
        if let ConstraintKind::NumericRange(range) = &kind {
            range.validate(&criterion)?;
        }

        Ok(Self {
            criterion,
            operator,
            priority,
            kind,
        })
    }

    /// Matches any value of `criterion`, and its absence
    pub fn wildcard(criterion: impl Into<String>, priority: i64) -> Result<Self> {
        Self::new(criterion, Operator::equal(false), priority, ConstraintKind::Wildcard)
    }

    pub fn boolean(
        criterion: impl Into<String>,
        value: bool,
        negated: bool,
        priority: i64,
    ) -> Result<Self> {
        Self::new(
            criterion,
            Operator::equal(negated),
            priority,
            ConstraintKind::Boolean(value),
        )
    }

    pub fn numeric_scalar(
        criterion: impl Into<String>,
        value: f64,
        negated: bool,
        priority: i64,
    ) -> Result<Self> {
        Self::new(
            criterion,
            Operator::equal(negated),
            priority,
            ConstraintKind::NumericScalar(value),
        )
    }

    pub fn numeric_range(
        criterion: impl Into<String>,
        min: f64,
        max: f64,
        negated: bool,
        priority: i64,
    ) -> Result<Self> {
        Self::new(
            criterion,
            Operator::member(negated),
            priority,
            ConstraintKind::NumericRange(NumericRange::new(min, max)),
        )
    }

    pub fn phase(
        criterion: impl Into<String>,
        operator: Operator,
        phases: impl IntoIterator<Item = PhaseType>,
        priority: i64,
    ) -> Result<Self> {
        Self::new(
            criterion,
            operator,
            priority,
            ConstraintKind::Phase(phases.into_iter().collect()),
        )
    }

    pub fn string<I, S>(
        criterion: impl Into<String>,
        operator: Operator,
        values: I,
        priority: i64,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            criterion,
            operator,
            priority,
            ConstraintKind::String(values.into_iter().map(Into::into).collect()),
        )
    }

    pub fn time_of_day_range(
        criterion: impl Into<String>,
        min: NaiveTime,
        max: NaiveTime,
        negated: bool,
        priority: i64,
    ) -> Result<Self> {
        Self::new(
            criterion,
            Operator::member(negated),
            priority,
            ConstraintKind::TimeOfDayRange(TimeOfDayRange::new(min, max)),
        )
    }

    pub fn time_of_year_range(
        criterion: impl Into<String>,
        min: DateTime<Utc>,
        max: DateTime<Utc>,
        negated: bool,
        priority: i64,
    ) -> Result<Self> {
        Self::new(
            criterion,
            Operator::member(negated),
            priority,
            ConstraintKind::TimeOfYearRange(TimeOfYearRange::new(min, max)),
        )
    }

    pub fn criterion(&self) -> &str {
        &self.criterion
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn priority(&self) -> i64 {
        self.priority
    }

    pub fn kind(&self) -> &ConstraintKind {
        &self.kind
    }

    /// Evaluate against the selector value for this criterion, if any.
    ///
    /// Default and Wildcard are always satisfied. Otherwise an absent value,
    /// or one whose kind cannot be compared with the payload, fails
    /// regardless of negation.
    pub fn test(&self, value: Option<&SelectorValue>) -> bool {
        let outcome = match (&self.kind, value) {
            (ConstraintKind::Default | ConstraintKind::Wildcard, _) => return true,
            (_, None) => None,
            (ConstraintKind::Boolean(expected), Some(v)) => v.as_bool().map(|b| b == *expected),
            (ConstraintKind::NumericScalar(expected), Some(v)) => v
                .as_f64()
                .map(|q| (q - expected).abs() < NUMERIC_TOLERANCE),
            (ConstraintKind::NumericRange(range), Some(v)) => {
                v.as_f64().map(|q| range.contains(q))
            }
            (ConstraintKind::Phase(phases), Some(v)) => {
                v.as_phase().map(|phase| phases.contains(&phase))
            }
            (ConstraintKind::String(values), Some(v)) => {
                v.as_text().map(|text| values.contains(text.as_ref()))
            }
            (ConstraintKind::TimeOfDayRange(range), Some(v)) => v
                .as_str()
                .and_then(|s| parse_time_of_day(s).ok())
                .map(|time| range.contains(time)),
            (ConstraintKind::TimeOfYearRange(range), Some(v)) => v
                .as_str()
                .and_then(|s| parse_instant(s).ok())
                .map(|instant| range.contains(instant)),
        };

        let satisfied = outcome.is_some_and(|b| self.operator.truth(b));
        tracing::trace!(
            criterion = %self.criterion,
            kind = self.kind.name(),
            satisfied,
            "Evaluated constraint"
        );
        satisfied
    }
}

impl Default for Constraint {
    /// The catch-all constraint: criterion `$default`, `EQ`, priority 0
    fn default() -> Self {
        Self {
            criterion: DEFAULT_CRITERION.to_string(),
            operator: Operator::equal(false),
            priority: 0,
            kind: ConstraintKind::Default,
        }
    }
}
