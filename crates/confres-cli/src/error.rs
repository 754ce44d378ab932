//! Error types for confres-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error loading the configuration directory
    #[error(transparent)]
    Store(#[from] confres_store::Error),

    /// Error resolving parameters
    #[error(transparent)]
    Resolve(#[from] confres_resolve::Error),

    /// Error rendering output
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Logging could not be initialized
    #[error("Failed to initialize logging: {message}")]
    Logging { message: String },
}
