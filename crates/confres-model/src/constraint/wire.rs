//! JSON wire shape of constraints, tagged by `constraintType`

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{Constraint, ConstraintKind, NumericRange, TimeOfDayRange, TimeOfYearRange};
use crate::error::Error;
use crate::operator::Operator;
use crate::phase::PhaseType;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "constraintType", rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum WireConstraint {
    Default,
    Wildcard {
        criterion: String,
        #[serde(default)]
        priority: i64,
    },
    Boolean {
        criterion: String,
        operator: Operator,
        #[serde(default)]
        priority: i64,
        value: bool,
    },
    NumericScalar {
        criterion: String,
        operator: Operator,
        #[serde(default)]
        priority: i64,
        value: f64,
    },
    NumericRange {
        criterion: String,
        operator: Operator,
        #[serde(default)]
        priority: i64,
        value: NumericRange,
    },
    Phase {
        criterion: String,
        operator: Operator,
        #[serde(default)]
        priority: i64,
        value: BTreeSet<PhaseType>,
    },
    String {
        criterion: String,
        operator: Operator,
        #[serde(default)]
        priority: i64,
        value: BTreeSet<String>,
    },
    TimeOfDayRange {
        criterion: String,
        operator: Operator,
        #[serde(default)]
        priority: i64,
        value: TimeOfDayRange,
    },
    TimeOfYearRange {
        criterion: String,
        operator: Operator,
        #[serde(default)]
        priority: i64,
        value: TimeOfYearRange,
    },
}

impl TryFrom<WireConstraint> for Constraint {
    type Error = Error;

    fn try_from(wire: WireConstraint) -> Result<Self, Self::Error> {
        match wire {
            WireConstraint::Default => Ok(Constraint::default()),
            WireConstraint::Wildcard {
                criterion,
                priority,
            } => Constraint::wildcard(criterion, priority),
            WireConstraint::Boolean {
                criterion,
                operator,
                priority,
                value,
            } => Constraint::new(criterion, operator, priority, ConstraintKind::Boolean(value)),
            WireConstraint::NumericScalar {
                criterion,
                operator,
                priority,
                value,
            } => Constraint::new(
                criterion,
                operator,
                priority,
                ConstraintKind::NumericScalar(value),
            ),
            WireConstraint::NumericRange {
                criterion,
                operator,
                priority,
                value,
            } => Constraint::new(
                criterion,
                operator,
                priority,
                ConstraintKind::NumericRange(value),
            ),
            WireConstraint::Phase {
                criterion,
                operator,
                priority,
                value,
            } => Constraint::new(criterion, operator, priority, ConstraintKind::Phase(value)),
            WireConstraint::String {
                criterion,
                operator,
                priority,
                value,
            } => Constraint::new(criterion, operator, priority, ConstraintKind::String(value)),
            WireConstraint::TimeOfDayRange {
                criterion,
                operator,
                priority,
                value,
            } => Constraint::new(
                criterion,
                operator,
                priority,
                ConstraintKind::TimeOfDayRange(value),
            ),
            WireConstraint::TimeOfYearRange {
                criterion,
                operator,
                priority,
                value,
            } => Constraint::new(
                criterion,
                operator,
                priority,
                ConstraintKind::TimeOfYearRange(value),
            ),
        }
    }
}

impl From<Constraint> for WireConstraint {
    fn from(constraint: Constraint) -> Self {
        let Constraint {
            criterion,
            operator,
            priority,
            kind,
        } = constraint;

        match kind {
            ConstraintKind::Default => WireConstraint::Default,
            ConstraintKind::Wildcard => WireConstraint::Wildcard {
                criterion,
                priority,
            },
            ConstraintKind::Boolean(value) => WireConstraint::Boolean {
                criterion,
                operator,
                priority,
                value,
            },
            ConstraintKind::NumericScalar(value) => WireConstraint::NumericScalar {
                criterion,
                operator,
                priority,
                value,
            },
            ConstraintKind::NumericRange(value) => WireConstraint::NumericRange {
                criterion,
                operator,
                priority,
                value,
            },
            ConstraintKind::Phase(value) => WireConstraint::Phase {
                criterion,
                operator,
                priority,
                value,
            },
            ConstraintKind::String(value) => WireConstraint::String {
                criterion,
                operator,
                priority,
                value,
            },
            ConstraintKind::TimeOfDayRange(value) => WireConstraint::TimeOfDayRange {
                criterion,
                operator,
                priority,
                value,
            },
            ConstraintKind::TimeOfYearRange(value) => WireConstraint::TimeOfYearRange {
                criterion,
                operator,
                priority,
                value,
            },
        }
    }
}
