//! Option selection
//!
//! An option matches when every one of its constraints is satisfied by the
//! selector sharing its criterion (or by the absence of one). Among matching
//! options the highest aggregate priority wins; ties go to the option
//! declared first.

use std::collections::HashMap;

use confres_model::{
    Configuration, ConfigurationOption, ParameterTree, Selector, SelectorValue, first_per_criterion,
};

use crate::error::{Error, Result};

/// Pick the winning option of `configuration` for `selectors`
pub fn select_option<'a>(
    configuration: &'a Configuration,
    selectors: &[Selector],
) -> Result<&'a ConfigurationOption> {
    let values = index_selectors(configuration, selectors);

    let mut winner: Option<(i64, &ConfigurationOption)> = None;
    for option in configuration.options() {
        let matches = option
            .constraints()
            .iter()
            .all(|c| c.test(values.get(c.criterion()).copied()));
        if !matches {
            continue;
        }

        let priority = option.priority();
        match winner {
            Some((best, _)) if best >= priority => {}
            _ => winner = Some((priority, option)),
        }
    }

    match winner {
        Some((priority, option)) => {
            tracing::debug!(
                configuration = configuration.name(),
                option = option.name(),
                priority,
                "Selected configuration option"
            );
            Ok(option)
        }
        None => Err(Error::NoMatchingOption {
            configuration: configuration.name().to_string(),
            selectors: selectors.to_vec(),
        }),
    }
}

/// Resolve the parameters of the winning option
pub fn resolve(configuration: &Configuration, selectors: &[Selector]) -> Result<ParameterTree> {
    select_option(configuration, selectors).map(|option| option.parameters().clone())
}

/// Criterion lookup; the first selector for a criterion wins
fn index_selectors<'s>(
    configuration: &Configuration,
    selectors: &'s [Selector],
) -> HashMap<&'s str, &'s SelectorValue> {
    let kept = first_per_criterion(selectors);
    if kept.len() < selectors.len() {
        tracing::warn!(
            configuration = configuration.name(),
            ignored = selectors.len() - kept.len(),
            "Ignoring duplicate selector criteria"
        );
    }
    kept.into_iter()
        .map(|selector| (selector.criterion(), selector.value()))
        .collect()
}
