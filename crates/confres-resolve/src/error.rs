//! Error types for confres-resolve

use confres_model::Selector;

/// Result type for resolution
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving parameters
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No option of the configuration is satisfied by the selectors
    #[error(
        "No option of configuration \"{configuration}\" matches selectors [{}]",
        describe(.selectors)
    )]
    NoMatchingOption {
        configuration: String,
        selectors: Vec<Selector>,
    },

    /// A reference target resolved to nothing
    #[error(
        "[Invalid Configuration Reference \"{reference}\"] : Configuration reference returned an empty configuration."
    )]
    EmptyReference { reference: String },

    /// A reference names a configuration that is not available
    #[error(
        "[Invalid Configuration Reference \"{reference}\"] : No Configuration named {key} is available"
    )]
    ReferenceTargetNotFound { reference: String, key: String },

    /// A reference entry is malformed or breaks the prefix rule
    #[error("[Invalid Configuration Reference \"{reference}\"] : {source}")]
    InvalidReference {
        reference: String,
        #[source]
        source: confres_model::Error,
    },

    /// A reference chain loops back onto itself
    #[error("Configuration reference cycle: {}", .chain.join(" -> "))]
    ReferenceCycle { chain: Vec<String> },

    /// The requested configuration is unknown
    #[error("No configuration named \"{name}\"")]
    ConfigurationNotFound { name: String },

    /// The repository kept failing after every retry
    #[error("Repository call failed after {attempts} attempt(s): {source}")]
    Repository {
        attempts: u32,
        #[source]
        source: confres_model::Error,
    },

    /// Resolved parameters do not fit the requested type
    #[error("Failed to deserialize parameters resolved from \"{configuration}\": {source}")]
    Deserialize {
        configuration: String,
        #[source]
        source: serde_json::Error,
    },

    /// Model construction error
    #[error(transparent)]
    Model(#[from] confres_model::Error),
}

fn describe(selectors: &[Selector]) -> String {
    selectors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
