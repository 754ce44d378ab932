//! Shared test utilities for the confres workspace.
//!
//! This crate provides standard fixtures so crate test suites do not each
//! rebuild the same configurations. It is a dev-dependency only, never
//! published.
//!
//! # Modules
//!
//! - [`fixtures`]: named options, the `global` configuration and references to it
//! - [`dir`]: [`ConfigDir`](dir::ConfigDir) builder for on-disk repositories
//! - [`repository`]: repositories that count calls and fail on demand

pub mod dir;
pub mod fixtures;
pub mod repository;

use std::path::PathBuf;

/// Path of the workspace `test-fixtures/configurations` directory
pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures/configurations")
}
