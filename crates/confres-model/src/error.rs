//! Error types for confres-model

use crate::operator::Operator;

/// Result type for model construction and decoding
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or decoding the configuration model.
///
/// These indicate a malformed configuration document and are never retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A required name was empty
    #[error("{kind} requires a non-empty name")]
    EmptyName { kind: &'static str },

    /// A constraint was built without a criterion
    #[error("{constraint} constraint requires a non-empty criterion")]
    EmptyCriterion { constraint: &'static str },

    /// Two or more constraints in one option share a criterion
    #[error(
        "ConfigurationOption \"{option}\" contains multiple constraints for criteria: {}",
        .criteria.join(", ")
    )]
    DuplicateCriteria { option: String, criteria: Vec<String> },

    /// A constraint variant was paired with an operator it cannot evaluate
    #[error("{constraint} constraint does not support operator {operator}")]
    UnsupportedOperator {
        constraint: &'static str,
        operator: Operator,
    },

    /// Range bounds are unordered or not finite
    #[error("Invalid range for criterion \"{criterion}\": {message}")]
    InvalidRange { criterion: String, message: String },

    /// A time-of-day or instant literal that does not parse
    #[error("Invalid {kind} literal \"{value}\"")]
    InvalidLiteral { kind: &'static str, value: String },

    /// A phase label that is not a known phase type
    #[error("Unknown phase type \"{label}\"")]
    UnknownPhase { label: String },

    /// A configuration reference entry could not be decoded
    #[error("Malformed configuration reference \"{key}\": {message}")]
    MalformedReference { key: String, message: String },

    /// A configuration reference pointed outside the global configuration space
    #[error("Configuration references must use the \"{prefix}\" key prefix.")]
    InvalidReferencePrefix { key: String, prefix: &'static str },

    /// Failure reported by a configuration repository
    #[error("Repository error: {message}")]
    Repository { message: String },
}

impl Error {
    /// Create a repository error with the given message
    pub fn repository(message: impl Into<String>) -> Self {
        Self::Repository {
            message: message.into(),
        }
    }
}
