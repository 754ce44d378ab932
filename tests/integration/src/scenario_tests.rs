//! End-to-end resolution through the consumer
//!
//! Each module drives an in-memory repository through
//! `ConfigurationConsumer`, so selection, caching and reference substitution
//! run together.

use confres_model::{
    Configuration, ConfigurationOption, Constraint, InMemoryConfigurationRepository, Selector,
};
use confres_resolve::{ConfigurationConsumer, Error};
use confres_test_utils::fixtures::{catch_all, config_ref, global_configuration, params, tree};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn consumer(configurations: Vec<Configuration>) -> ConfigurationConsumer {
    let mut all = vec![global_configuration()];
    all.extend(configurations);
    ConfigurationConsumer::builder(InMemoryConfigurationRepository::new(all))
        .build()
        .unwrap()
}

fn station_option(name: &str, sta: f64) -> ConfigurationOption {
    let constraint = Constraint::numeric_scalar("sta", sta, false, 100).unwrap();
    ConfigurationOption::new(name, vec![constraint], tree(json!({ "option": name }))).unwrap()
}

// =============================================================================
// Numeric selection
// =============================================================================

mod numeric_selection {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn snr() -> ConfigurationConsumer {
        let option = ConfigurationOption::new(
            "snr-option",
            vec![Constraint::numeric_scalar("sta", 5.0, false, 100).unwrap()],
            tree(json!({ "snrThreshold": 10.0, "enabled": true })),
        )
        .unwrap();
        consumer(vec![Configuration::new("SNR-10", vec![option]).unwrap()])
    }

    #[rstest]
    #[case(5.0)]
    #[case(5.0 + 1e-17)]
    fn test_scalar_match_resolves(#[case] sta: f64) {
        let resolved = snr().resolve("SNR-10", &[Selector::new("sta", sta)]).unwrap();
        assert_eq!(resolved, tree(json!({ "snrThreshold": 10.0, "enabled": true })));
    }

    #[test]
    fn test_value_outside_tolerance_does_not_match() {
        let err = snr()
            .resolve("SNR-10", &[Selector::new("sta", 5.000_000_000_01)])
            .unwrap_err();
        assert!(matches!(err, Error::NoMatchingOption { .. }), "got: {err}");
    }
}

// =============================================================================
// Options sharing a criterion
// =============================================================================

mod shared_criterion {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_same_criterion_across_options_is_legal() {
        let configuration = Configuration::new(
            "stations",
            vec![station_option("five", 5.0), station_option("six", 6.0)],
        )
        .unwrap();
        let consumer = consumer(vec![configuration]);

        assert_eq!(
            consumer.resolve("stations", &[Selector::new("sta", 6.0)]).unwrap(),
            tree(json!({ "option": "six" }))
        );
        assert_eq!(
            consumer.resolve("stations", &[Selector::new("sta", 5.0)]).unwrap(),
            tree(json!({ "option": "five" }))
        );
    }

    #[test]
    fn test_higher_priority_beats_catch_all() {
        let configuration = Configuration::new(
            "stations",
            vec![catch_all("fallback", json!({ "option": "fallback" })), station_option("five", 5.0)],
        )
        .unwrap();
        let consumer = consumer(vec![configuration]);

        assert_eq!(
            consumer.resolve("stations", &[Selector::new("sta", 5.0)]).unwrap(),
            tree(json!({ "option": "five" }))
        );
        assert_eq!(
            consumer.resolve("stations", &[Selector::new("sta", 1.0)]).unwrap(),
            tree(json!({ "option": "fallback" }))
        );
    }
}

// =============================================================================
// References
// =============================================================================

mod references {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reference_merges_with_plain_field() {
        let (key, value) = config_ref(7);
        let component = Configuration::new(
            "component",
            vec![catch_all("default", json!({ key: value, "non_reference_field": "value" }))],
        )
        .unwrap();
        let consumer = consumer(vec![component]);

        let resolved = consumer.resolve("component", &[]).unwrap();

        let mut expected = params(7);
        expected.insert("non_reference_field".into(), json!("value"));
        assert_eq!(resolved, expected);
        assert!(resolved.keys().all(|k| !k.starts_with("$ref:")));
    }

    #[test]
    fn test_repeated_resolution_is_stable() {
        let (key, value) = config_ref(3);
        let component = Configuration::new(
            "component",
            vec![catch_all("default", json!({ "filter": { key: value } }))],
        )
        .unwrap();
        let consumer = consumer(vec![component]);

        let first = consumer.resolve("component", &[]).unwrap();
        let second = consumer.resolve("component", &[]).unwrap();
        assert_eq!(first, second);
        assert_eq!(first["filter"], Value::Object(params(3)));
    }
}

// =============================================================================
// Null values
// =============================================================================

mod null_values {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_null_survives_plain_resolution() {
        let configuration =
            Configuration::new("nulls", vec![catch_all("default", json!({ "threshold": null }))])
                .unwrap();
        let consumer = consumer(vec![configuration]);

        let resolved = consumer.resolve("nulls", &[]).unwrap();
        assert_eq!(resolved.get("threshold"), Some(&Value::Null));
    }

    #[test]
    fn test_null_survives_reference_substitution() {
        let (key, value) = config_ref(1);
        let configuration = Configuration::new(
            "nulls",
            vec![catch_all("default", json!({ key: value, "threshold": null }))],
        )
        .unwrap();
        let consumer = consumer(vec![configuration]);

        let resolved = consumer.resolve("nulls", &[]).unwrap();
        assert_eq!(resolved.get("threshold"), Some(&Value::Null));
        assert_eq!(resolved["field1"], json!("field1_val1"));
    }
}
