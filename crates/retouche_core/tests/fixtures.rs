//! Fixture tests for the transformations.
//!
//! Cases are loaded from TOML fixtures in tests/fixtures/ at the workspace
//! root. A case without `expected` must be left unchanged.

use retouche_core::{transform_file, Transformation, TransformOptions};
use serde::Deserialize;
use std::path::PathBuf;

/// A test case from a TOML fixture
#[derive(Debug, Deserialize)]
struct TestCase {
    name: String,
    input: String,
    expected: Option<String>,
    #[serde(default)]
    options: Option<TransformOptions>,
    #[serde(default)]
    dropped: Vec<String>,
}

/// A fixture file containing multiple test cases
#[derive(Debug, Deserialize)]
struct Fixture {
    transformation: String,
    cases: Vec<TestCase>,
}

/// Get the path to the tests/fixtures directory
fn fixtures_path() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    PathBuf::from(manifest_dir)
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures")
}

fn load_fixture(name: &str) -> Fixture {
    let path = fixtures_path().join(format!("{name}.toml"));
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    toml::from_str(&content).unwrap_or_else(|e| panic!("invalid fixture {}: {e}", path.display()))
}

fn run_fixture(name: &str) {
    let fixture = load_fixture(name);
    let transformation: Transformation = fixture.transformation.parse().unwrap();
    assert!(!fixture.cases.is_empty());

    for case in &fixture.cases {
        let options = case.options.clone().unwrap_or_default();
        let outcome = transform_file("Fixture.vue", &case.input, transformation, &options)
            .unwrap_or_else(|e| panic!("[{}] {e}", case.name));

        let expected = case.expected.as_deref().unwrap_or(&case.input);
        assert_eq!(outcome.code, expected, "[{}] output", case.name);
        assert_eq!(
            outcome.changed,
            case.expected.is_some(),
            "[{}] changed",
            case.name
        );
        assert_eq!(outcome.dropped_options, case.dropped, "[{}] dropped options", case.name);

        if transformation == Transformation::ScriptSetup {
            let again = transform_file("Fixture.vue", &outcome.code, transformation, &options)
                .unwrap_or_else(|e| panic!("[{}] second run: {e}", case.name));
            assert!(!again.changed, "[{}] second run changed the file", case.name);
        }
    }
}

#[test]
fn script_setup_fixtures() {
    run_fixture("script_setup");
}

#[test]
fn define_props_fixtures() {
    run_fixture("define_props");
}
