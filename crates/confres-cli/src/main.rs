//! confres CLI
//!
//! Lists and resolves configurations stored in a directory tree.

mod cli;
mod commands;
mod error;
mod logging;

use std::time::Duration;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use commands::ResolveOptions;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Commands::List { root } => commands::run_list(&root),
        Commands::Resolve {
            root,
            name,
            selectors,
            prefixes,
            cache_max_entries,
            cache_expiration_secs,
            retry_attempts,
        } => commands::run_resolve(
            &root,
            &name,
            &selectors,
            &ResolveOptions {
                prefixes,
                cache_max_entries,
                cache_expiration: Duration::from_secs(cache_expiration_secs),
                retry_attempts,
            },
        ),
    }
}
