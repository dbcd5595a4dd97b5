//! Shared helpers for the integration suite.

use function_catalog::{CatalogResult, FunctionCatalog};
use serde_json::{Map, Value, json};
use std::path::PathBuf;
use std::sync::Once;

static LOGGER: Once = Once::new();

/// Route `log` output through env_logger once per test binary.
pub fn init_logging() {
    LOGGER.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Absolute path of a file under `tests/fixtures/`.
pub fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

/// The `valid/math.json` catalogue.
pub fn math_catalog() -> FunctionCatalog {
    FunctionCatalog::from_file(fixture_path("catalogs/valid/math.json"))
        .expect("math fixture should load")
}

/// Handler for `scale`: multiplies every element of `vector` by `factor`.
pub fn scale(_project: &str, params: &Map<String, Value>) -> CatalogResult<Value> {
    let factor = params.get("factor").and_then(Value::as_f64).unwrap_or(1.0);
    let vector: Vec<f64> = params
        .get("vector")
        .and_then(Value::as_array)
        .map(|values| values.iter().filter_map(Value::as_f64).map(|v| v * factor).collect())
        .unwrap_or_default();
    Ok(json!({ "vector": vector }))
}
