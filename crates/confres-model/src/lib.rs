//! Configuration model for the confres resolution engine
//!
//! This crate holds the immutable building blocks that resolution runs over:
//!
//! - [`Selector`]: a criterion plus a typed value, supplied per query
//! - [`Operator`] and [`Constraint`]: typed rules a selector must satisfy
//! - [`ConfigurationOption`]: a named constraint bundle with parameters
//! - [`Configuration`]: an ordered set of options
//! - [`ConfigurationReference`]: a marker asking for another
//!   configuration's parameters
//! - [`ConfigurationRepository`]: where configurations come from
//!
//! Every type validates on construction and on deserialization, so a value
//! that exists is well formed.

pub mod configuration;
pub mod constraint;
pub mod error;
pub mod operator;
pub mod option;
pub mod phase;
pub mod reference;
pub mod repository;
pub mod selector;

pub use configuration::Configuration;
pub use constraint::{
    Constraint, ConstraintKind, DEFAULT_CRITERION, NUMERIC_TOLERANCE, NumericRange,
    TimeOfDayRange, TimeOfYearRange,
};
pub use error::{Error, Result};
pub use operator::{Operator, OperatorType};
pub use option::ConfigurationOption;
pub use phase::PhaseType;
pub use reference::{ConfigurationReference, GLOBAL_CONFIGURATION_PREFIX, REF_COMMAND};
pub use repository::{ConfigurationRepository, InMemoryConfigurationRepository};
pub use selector::{Selector, SelectorKey, SelectorValue, first_per_criterion, selector_key};

/// Parameter tree carried by options and returned by resolution
pub type ParameterTree = serde_json::Map<String, serde_json::Value>;
