//! File-backed storage for confres configurations
//!
//! Reads a directory of option documents (JSON, YAML or TOML) into
//! [`Configuration`](confres_model::Configuration)s and serves them through
//! the [`ConfigurationRepository`](confres_model::ConfigurationRepository)
//! trait.

pub mod error;
pub mod format;
pub mod repository;

pub use error::{Error, Result};
pub use format::{DocumentFormat, load_options};
pub use repository::FileConfigurationRepository;
