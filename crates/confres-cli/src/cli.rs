//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use confres_model::{Selector, SelectorValue};

/// confres - resolve configuration parameters from a directory of options
#[derive(Parser, Debug)]
#[command(name = "confres")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List configurations and their options
    List {
        /// Root directory; each subdirectory is one configuration
        root: PathBuf,
    },

    /// Resolve a configuration and print its parameters as JSON
    ///
    /// Examples:
    ///   confres resolve ./configs component
    ///   confres resolve ./configs global.filters -s name=filter4-8
    Resolve {
        /// Root directory; each subdirectory is one configuration
        root: PathBuf,

        /// Configuration name
        name: String,

        /// Selector as criterion=value (value parses as bool, then number, else string)
        #[arg(short = 's', long = "selector", value_parser = parse_selector)]
        selectors: Vec<Selector>,

        /// Additional configuration name prefixes to preload
        #[arg(long = "prefix")]
        prefixes: Vec<String>,

        /// Maximum cached results per configuration
        #[arg(long, default_value_t = 100)]
        cache_max_entries: u64,

        /// Seconds a cached result stays valid
        #[arg(long, default_value_t = 86_400)]
        cache_expiration_secs: u64,

        /// Attempts for each repository call
        #[arg(long, default_value_t = 1)]
        retry_attempts: u32,
    },
}

/// Parse `criterion=value`
pub fn parse_selector(input: &str) -> Result<Selector, String> {
    let (criterion, raw) = input
        .split_once('=')
        .ok_or_else(|| format!("expected criterion=value, got \"{input}\""))?;
    if criterion.is_empty() {
        return Err(format!("missing criterion in \"{input}\""));
    }

    let value = if let Ok(b) = raw.parse::<bool>() {
        SelectorValue::Bool(b)
    } else if let Ok(n) = raw.parse::<f64>() {
        SelectorValue::Number(n)
    } else {
        SelectorValue::String(raw.to_string())
    };
    Ok(Selector::new(criterion, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[rstest]
    #[case("flag=true", SelectorValue::Bool(true))]
    #[case("sta=5", SelectorValue::Number(5.0))]
    #[case("sta=-2.5", SelectorValue::Number(-2.5))]
    #[case("name=filter4-8", SelectorValue::String("filter4-8".into()))]
    #[case("empty=", SelectorValue::String(String::new()))]
    #[case("expr=a=b", SelectorValue::String("a=b".into()))]
    fn test_parse_selector(#[case] input: &str, #[case] expected: SelectorValue) {
        let selector = parse_selector(input).unwrap();
        assert_eq!(selector.value(), &expected);
    }

    #[test]
    fn test_parse_selector_rejects_missing_separator() {
        assert!(parse_selector("novalue").is_err());
        assert!(parse_selector("=x").is_err());
    }

    #[test]
    fn test_parse_resolve_command() {
        let cli = Cli::try_parse_from([
            "confres", "resolve", "root", "component", "-s", "name=x", "--prefix", "component",
        ])
        .unwrap();

        match cli.command {
            Commands::Resolve {
                name,
                selectors,
                prefixes,
                ..
            } => {
                assert_eq!(name, "component");
                assert_eq!(selectors.len(), 1);
                assert_eq!(prefixes, vec!["component"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
