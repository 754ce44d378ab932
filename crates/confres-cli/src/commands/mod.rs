//! Command implementations for confres-cli

pub mod list;
pub mod resolve;

pub use list::run_list;
pub use resolve::{ResolveOptions, run_resolve};
