//! Error types for confres-store

use std::path::PathBuf;

/// Result type for confres-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading configuration documents
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} document at {path}: {message}")]
    Parse {
        path: PathBuf,
        format: &'static str,
        message: String,
    },

    #[error("Unsupported document format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Configuration root not found: {path}")]
    RootNotFound { path: PathBuf },

    #[error(transparent)]
    Model(#[from] confres_model::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<Error> for confres_model::Error {
    fn from(error: Error) -> Self {
        confres_model::Error::repository(error.to_string())
    }
}
