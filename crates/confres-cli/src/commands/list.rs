//! List configurations in a directory

use std::path::Path;

use colored::Colorize;
use confres_store::FileConfigurationRepository;

use crate::error::Result;

/// Run the list command
pub fn run_list(root: &Path) -> Result<()> {
    let repository = FileConfigurationRepository::load(root)?;

    if repository.is_empty() {
        println!("No configurations found in {}", root.display());
        return Ok(());
    }

    println!("{}", "Configurations".bold());
    println!();

    for configuration in repository.configurations() {
        let marker = if configuration.is_global() { " (global)" } else { "" };
        println!("{}{}", configuration.name().cyan().bold(), marker.dimmed());
        for option in configuration.options() {
            println!(
                "  {:<24} priority {:>4}, {} constraint(s)",
                option.name().green(),
                option.priority(),
                option.constraints().len()
            );
        }
    }

    Ok(())
}
