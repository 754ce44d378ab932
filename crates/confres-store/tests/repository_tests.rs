//! Tests for the directory-backed repository

use confres_model::ConfigurationRepository;
use confres_store::{Error, FileConfigurationRepository};
use confres_test_utils::dir::ConfigDir;
use confres_test_utils::fixtures_root;
use pretty_assertions::assert_eq;
use serde_json::json;

fn option_names(repository: &FileConfigurationRepository, name: &str) -> Vec<String> {
    repository
        .get(name)
        .unwrap()
        .unwrap()
        .options()
        .iter()
        .map(|o| o.name().to_string())
        .collect()
}

mod loading {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_each_directory_is_a_configuration() {
        let dir = ConfigDir::new();
        dir.write("global", "a.yaml", "name: a\nparameters: {x: 1}\n");
        dir.write("component", "b.json", r#"{"name": "b"}"#);

        let repository = FileConfigurationRepository::load(dir.root()).unwrap();

        assert_eq!(repository.len(), 2);
        assert!(repository.get("global").unwrap().is_some());
        assert!(repository.get("component").unwrap().is_some());
    }

    #[test]
    fn test_options_ordered_by_file_then_position() {
        let dir = ConfigDir::new();
        dir.write_json(
            "cfg",
            "b.json",
            &json!([{"name": "b1"}, {"name": "b2"}]),
        );
        dir.write("cfg", "a.yaml", "- name: a1\n- name: a2\n");
        dir.write("cfg", "c.toml", "name = \"c1\"\n");

        let repository = FileConfigurationRepository::load(dir.root()).unwrap();
        assert_eq!(option_names(&repository, "cfg"), vec!["a1", "a2", "b1", "b2", "c1"]);
    }

    #[test]
    fn test_bad_files_are_skipped() {
        let dir = ConfigDir::new();
        dir.write("cfg", "good.yaml", "name: good\n");
        dir.write("cfg", "broken.json", "{ not json");
        dir.write(
            "cfg",
            "duplicate.json",
            r#"{"name": "dup", "constraints": [
                {"constraintType": "WILDCARD", "criterion": "x"},
                {"constraintType": "WILDCARD", "criterion": "x"}
            ]}"#,
        );
        dir.write("cfg", "README.md", "# notes");

        let repository = FileConfigurationRepository::load(dir.root()).unwrap();
        assert_eq!(option_names(&repository, "cfg"), vec!["good"]);
    }

    #[test]
    fn test_empty_directory_is_empty_configuration() {
        let dir = ConfigDir::new();
        dir.mkdir("empty");

        let repository = FileConfigurationRepository::load(dir.root()).unwrap();
        let configuration = repository.get("empty").unwrap().unwrap();
        assert!(configuration.options().is_empty());
        assert!(configuration.change_time().is_none());
    }

    #[test]
    fn test_change_time_comes_from_files() {
        let dir = ConfigDir::new();
        dir.write("cfg", "a.yaml", "name: a\n");

        let repository = FileConfigurationRepository::load(dir.root()).unwrap();
        assert!(repository.get("cfg").unwrap().unwrap().change_time().is_some());
    }

    #[test]
    fn test_missing_root() {
        let dir = ConfigDir::new();
        let err = FileConfigurationRepository::load(dir.root().join("nope")).unwrap_err();
        assert!(matches!(err, Error::RootNotFound { .. }));
    }
}

mod lookup {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_key_range() {
        let dir = ConfigDir::new();
        for name in ["global", "global.filters", "component"] {
            dir.write(name, "o.yaml", "name: o\n");
        }
        let repository = FileConfigurationRepository::load(dir.root()).unwrap();

        let names: Vec<String> = repository
            .get_key_range("global")
            .unwrap()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["global", "global.filters"]);
        assert!(repository.get("absent").unwrap().is_none());
    }

    #[test]
    fn test_reference_example_fixture_loads() {
        let repository =
            FileConfigurationRepository::load(fixtures_root().join("component-reference-example"))
                .unwrap();

        let names: Vec<&str> = repository.configurations().map(|c| c.name()).collect();
        assert_eq!(names, vec!["component", "global.filters"]);
        assert!(option_names(&repository, "global.filters").contains(&"filter4-8".to_string()));
    }
}
