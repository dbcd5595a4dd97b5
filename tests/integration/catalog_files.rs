//! Loading catalogues from files on disk.

use crate::common::{fixture_path, init_logging, math_catalog};
use function_catalog::{CatalogError, FunctionCatalog, SchemaType, ValidationError};
use std::fs;

#[test]
fn test_load_valid_fixture() {
    init_logging();
    let catalog = math_catalog();

    assert_eq!(catalog.function_names(), vec!["add", "scale"]);
    let scale = catalog.get("scale").unwrap();
    assert_eq!(scale.required_parameters(), ["vector", "factor"]);
    assert_eq!(
        scale.parameter("factor").and_then(|p| p.description.as_deref()),
        Some("Multiplier applied to every element")
    );
    assert_eq!(
        scale
            .result_field("vector")
            .and_then(|p| p.items.as_ref())
            .and_then(|i| i.schema_type),
        Some(SchemaType::Number)
    );
}

#[test]
fn test_invalid_fixture_reports_every_issue() {
    init_logging();
    let result = FunctionCatalog::from_file(fixture_path("catalogs/invalid/broken.json"));

    let issues = match result {
        Err(CatalogError::InvalidCatalog { issues }) => issues,
        other => panic!("Expected InvalidCatalog, got {:?}", other),
    };

    let found: Vec<(&str, &ValidationError)> = issues
        .iter()
        .map(|issue| (issue.path.as_str(), &issue.error))
        .collect();

    assert_eq!(
        found,
        vec![
            (
                "[0].input.properties.arr.items",
                &ValidationError::MissingArrayItems {
                    property: "arr".to_string()
                }
            ),
            (
                "[0].input.properties.num1.type",
                &ValidationError::MissingPropertyType {
                    property: "num1".to_string()
                }
            ),
            (
                "[0].input.required",
                &ValidationError::UndeclaredRequired {
                    property: "num2".to_string()
                }
            ),
            (
                "[1].output.type",
                &ValidationError::NotObjectSchema {
                    actual: "string".to_string()
                }
            ),
            (
                "[1].function",
                &ValidationError::DuplicateFunction {
                    function: "add".to_string()
                }
            ),
        ]
    );
}

#[test]
fn test_missing_file_is_io_error() {
    let result = FunctionCatalog::from_file(fixture_path("catalogs/does-not-exist.json"));
    match result {
        Err(CatalogError::Io { path, .. }) => {
            assert!(path.ends_with("does-not-exist.json"));
        }
        other => panic!("Expected Io error, got {:?}", other),
    }
}

#[test]
fn test_written_catalog_reloads_identically() {
    let catalog = math_catalog();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schema.js");
    fs::write(&path, catalog.to_json_pretty().unwrap()).unwrap();

    let reloaded = FunctionCatalog::from_file(&path).unwrap();
    assert_eq!(reloaded.descriptors(), catalog.descriptors());
    assert_eq!(reloaded.version().unwrap(), catalog.version().unwrap());
}

#[test]
fn test_syntax_error_is_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("truncated.json");
    fs::write(&path, r#"[{"title": "Addition", "function": "add""#).unwrap();

    assert!(matches!(
        FunctionCatalog::from_file(&path),
        Err(CatalogError::Json(_))
    ));
}

#[test]
fn test_embedded_and_fixture_versions_differ() {
    let embedded = FunctionCatalog::new().unwrap();
    assert_ne!(
        embedded.version().unwrap(),
        math_catalog().version().unwrap()
    );
}
