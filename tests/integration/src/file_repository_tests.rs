//! Directory-backed repositories resolved end to end

use confres_model::Selector;
use confres_resolve::ConfigurationConsumer;
use confres_store::FileConfigurationRepository;
use confres_test_utils::dir::ConfigDir;
use confres_test_utils::fixtures_root;
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilterDefinition {
    description: String,
    causal: bool,
    filter_type: String,
    pass_band_type: String,
    low_frequency: f64,
    high_frequency: Option<f64>,
    order: u32,
}

fn example_consumer() -> ConfigurationConsumer {
    let repository =
        FileConfigurationRepository::load(fixtures_root().join("component-reference-example"))
            .unwrap();
    ConfigurationConsumer::builder(repository)
        .configuration_name_prefixes(["component"])
        .build()
        .unwrap()
}

// =============================================================================
// Component reference example
// =============================================================================

#[test]
fn test_component_resolves_referenced_filter() {
    let resolved = example_consumer().resolve("component", &[]).unwrap();

    assert_eq!(resolved["binary"], json!(true));
    assert_eq!(resolved["numeric"], json!(1));
    assert_eq!(resolved["string"], json!("string"));
    assert_eq!(resolved["description"], json!("4.0 8.0 3 BP causal"));
    assert_eq!(resolved["highFrequency"], json!(8.0));
    assert!(resolved.keys().all(|k| !k.starts_with("$ref:")));
}

#[test]
fn test_filters_resolve_as_typed_values() {
    let consumer = example_consumer();

    let filter: FilterDefinition = consumer
        .resolve_as("global.filters", &[Selector::new("name", "filter1-3")])
        .unwrap();
    assert_eq!(
        filter,
        FilterDefinition {
            description: "1.0 3.0 3 BP causal".into(),
            causal: true,
            filter_type: "IIR_BUTTERWORTH".into(),
            pass_band_type: "BAND_PASS".into(),
            low_frequency: 1.0,
            high_frequency: Some(3.0),
            order: 3,
        }
    );

    let highpass: FilterDefinition = consumer
        .resolve_as("global.filters", &[Selector::new("name", "highpass-0.5")])
        .unwrap();
    assert_eq!(highpass.high_frequency, None);
}

#[test]
fn test_preloaded_names_include_global_configurations() {
    let names = example_consumer().configuration_names();
    assert_eq!(names, vec!["component".to_string(), "global.filters".to_string()]);
}

// =============================================================================
// Ad-hoc directories
// =============================================================================

#[test]
fn test_mixed_formats_and_nested_reference() {
    let dir = ConfigDir::new();
    dir.write(
        "global.thresholds",
        "thresholds.toml",
        r#"
[[configurationOptions]]
name = "strict"
parameters = { snr = 10.0, note = "strict" }

[[configurationOptions.constraints]]
constraintType = "STRING"
criterion = "mode"
operator = { type = "EQ" }
priority = 10
value = ["strict"]
"#,
    );
    dir.write_json(
        "detector",
        "detector.json",
        &json!({
            "name": "detector-default",
            "constraints": [ { "constraintType": "DEFAULT" } ],
            "parameters": {
                "stages": [
                    {
                        "$ref:global.thresholds": [ { "criterion": "mode", "value": "strict" } ],
                        "note": "override"
                    }
                ],
                "missing": null
            }
        }),
    );

    let repository = FileConfigurationRepository::load(dir.root()).unwrap();
    let consumer = ConfigurationConsumer::builder(repository).build().unwrap();
    let resolved = consumer.resolve("detector", &[]).unwrap();

    assert_eq!(resolved["stages"][0], json!({ "snr": 10.0, "note": "override" }));
    assert_eq!(resolved.get("missing"), Some(&Value::Null));
}

#[test]
fn test_broken_file_is_skipped() {
    let dir = ConfigDir::new();
    dir.write("global.defaults", "broken.yaml", "name: [unterminated");
    dir.write(
        "global.defaults",
        "ok.yaml",
        "name: ok\nconstraints:\n  - constraintType: DEFAULT\nparameters: {value: 1}\n",
    );

    let repository = FileConfigurationRepository::load(dir.root()).unwrap();
    let consumer = ConfigurationConsumer::builder(repository).build().unwrap();

    assert_eq!(
        consumer.resolve("global.defaults", &[]).unwrap()["value"],
        json!(1)
    );
}
