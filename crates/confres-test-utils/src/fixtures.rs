//! In-memory configuration fixtures.
//!
//! The numbered fixtures follow one shape: option `cfg{id}` carries a
//! `String` constraint on criterion `name` equal to `cfg{id}` (priority 100)
//! and the parameters `{id, field1: "field1_val{id}", field2: "field2_val{id}"}`.

use confres_model::{
    Configuration, ConfigurationOption, ConfigurationReference, Constraint, Operator,
    ParameterTree, Selector,
};
use serde_json::{Value, json};

/// Name of the shared fixture configuration
pub const GLOBAL: &str = "global";

/// Criterion every numbered option is keyed on
pub const NAME_CRITERION: &str = "name";

/// Turn a JSON object literal into a parameter tree.
///
/// # Panics
/// Panics if `value` is not an object.
pub fn tree(value: Value) -> ParameterTree {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

pub fn option_name(id: usize) -> String {
    format!("cfg{id}")
}

/// Parameters of option `cfg{id}`
pub fn params(id: usize) -> ParameterTree {
    tree(json!({
        "id": id,
        "field1": format!("field1_val{id}"),
        "field2": format!("field2_val{id}"),
    }))
}

/// Option `cfg{id}`
pub fn named_option(id: usize) -> ConfigurationOption {
    let name = option_name(id);
    let constraint =
        Constraint::string(NAME_CRITERION, Operator::equal(false), [name.clone()], 100).unwrap();
    ConfigurationOption::new(name, vec![constraint], params(id)).unwrap()
}

/// Configuration `name` holding options `cfg0..cfg{count-1}`
pub fn numbered_configuration(name: &str, count: usize) -> Configuration {
    Configuration::new(name, (0..count).map(named_option).collect()).unwrap()
}

/// The `global` configuration with options `cfg0..cfg9`
pub fn global_configuration() -> Configuration {
    numbered_configuration(GLOBAL, 10)
}

/// Selector picking option `cfg{id}`
pub fn name_selector(id: usize) -> Selector {
    Selector::new(NAME_CRITERION, option_name(id))
}

/// Reference entry asking `global` for option `cfg{id}`
pub fn config_ref(id: usize) -> (String, Value) {
    ConfigurationReference::new(GLOBAL, vec![name_selector(id)]).to_entry()
}

/// Option named `name` that always matches, carrying `parameters`
pub fn catch_all(name: &str, parameters: Value) -> ConfigurationOption {
    ConfigurationOption::new(name, vec![Constraint::default()], tree(parameters)).unwrap()
}
