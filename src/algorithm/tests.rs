//! Tests for the algorithm service: lifecycle, dispatch and schema checks.

use super::app::AlgorithmApp;
use super::builder::{AlgorithmServiceBuilder, AlgorithmServiceConfig};
use super::service::{AlgorithmService, InvocationRequest};
use crate::error::{CatalogError, CatalogResult, ValidationError};
use crate::schema::{FunctionCatalog, embedded};
use serde_json::{Map, Value, json};

fn started(service: AlgorithmService) -> AlgorithmService {
    service.start().expect("start should succeed");
    service
}

#[tokio::test]
async fn test_builtins_dispatch() {
    let service = started(AlgorithmService::with_builtins().unwrap());

    let sum = service
        .run("p1", "add", json!({"num1": 2, "num2": 3}))
        .await
        .unwrap();
    assert_eq!(sum, json!({"num1": 5}));

    let abs = service.run("p1", "abs", json!({"num1": -4.5})).await.unwrap();
    assert_eq!(abs, json!({"res": 4.5}));

    let total = service
        .run("p1", "arrayArguments", json!({"arr1": [1, 2], "arr2": [3]}))
        .await
        .unwrap();
    assert_eq!(total, json!({"result": 6}));

    let now = service.run("p1", "now", json!({})).await.unwrap();
    assert!(now["sysdate"].is_string());
}

#[tokio::test]
async fn test_run_requires_started_service() {
    let service = AlgorithmService::with_builtins().unwrap();
    let result = service.run("p1", "now", json!({})).await;
    assert!(matches!(result, Err(CatalogError::NotRunning { app_id }) if app_id == "function-catalog"));

    service.start().unwrap();
    assert!(service.is_running());
    service.stop().unwrap();
    assert!(!service.is_running());
    assert!(service.run("p1", "now", json!({})).await.is_err());
}

#[tokio::test]
async fn test_unknown_function() {
    let service = started(AlgorithmService::with_builtins().unwrap());
    let result = service.run("p1", "subtract", json!({})).await;
    assert!(matches!(result, Err(CatalogError::UnknownFunction(f)) if f == "subtract"));
}

#[tokio::test]
async fn test_params_are_validated_before_dispatch() {
    let service = started(AlgorithmService::with_builtins().unwrap());
    let result = service.run("p1", "add", json!({"num1": 2})).await;
    assert!(matches!(
        result,
        Err(CatalogError::Validation(ValidationError::MissingRequiredParameter { parameter })) if parameter == "num2"
    ));
}

#[tokio::test]
async fn test_unknown_parameters_follow_config() {
    let strict = started(AlgorithmService::with_builtins().unwrap());
    assert!(
        strict
            .run("p1", "now", json!({"tz": "UTC"}))
            .await
            .is_err()
    );

    let lenient = started(
        AlgorithmServiceBuilder::new(FunctionCatalog::new().unwrap())
            .allow_unknown_parameters(true)
            .with_builtins()
            .build()
            .unwrap(),
    );
    assert!(lenient.run("p1", "now", json!({"tz": "UTC"})).await.is_ok());
}

#[tokio::test]
async fn test_missing_handler_is_not_implemented() {
    let service = started(
        AlgorithmServiceBuilder::new(FunctionCatalog::new().unwrap())
            .with_function_fn("add", |_, _| Ok(json!({"num1": 0})))
            .build()
            .unwrap(),
    );
    assert_eq!(service.registered_functions(), vec!["add"]);

    let result = service.run("p1", "abs", json!({"num1": 1})).await;
    assert!(matches!(result, Err(CatalogError::NotImplemented(f)) if f == "abs"));
}

#[tokio::test]
async fn test_fallback_receives_function_name() {
    let service = started(
        AlgorithmServiceBuilder::new(FunctionCatalog::new().unwrap())
            .with_fallback_fn(|project, function, _| Ok(json!({"res": format!("{project}:{function}")})))
            .build()
            .unwrap(),
    );

    // "res" is declared as a number, so the lenient default only logs
    let result = service.run("p9", "abs", json!({"num1": 1})).await.unwrap();
    assert_eq!(result, json!({"res": "p9:abs"}));
}

#[tokio::test]
async fn test_output_mismatch_strict_and_lenient() {
    let wrong_key = |_: &str, _: &Map<String, Value>| -> CatalogResult<Value> { Ok(json!({"num": 1})) };

    let lenient = started(
        AlgorithmServiceBuilder::new(FunctionCatalog::new().unwrap())
            .with_function_fn("abs", wrong_key)
            .build()
            .unwrap(),
    );
    assert_eq!(
        lenient.run("p1", "abs", json!({"num1": -1})).await.unwrap(),
        json!({"num": 1})
    );

    let strict = started(
        AlgorithmServiceBuilder::new(FunctionCatalog::new().unwrap())
            .strict_output(true)
            .with_function_fn("abs", wrong_key)
            .build()
            .unwrap(),
    );
    let result = strict.run("p1", "abs", json!({"num1": -1})).await;
    match result {
        Err(CatalogError::OutputMismatch { function, source }) => {
            assert_eq!(function, "abs");
            assert_eq!(
                source,
                ValidationError::UnknownParameter {
                    parameter: "num".to_string()
                }
            );
        }
        other => panic!("Expected OutputMismatch, got {:?}", other),
    }
}

#[tokio::test]
async fn test_float_overflow_fails_under_strict_output() {
    let service = started(
        AlgorithmServiceBuilder::new(FunctionCatalog::new().unwrap())
            .strict_output(true)
            .with_builtins()
            .build()
            .unwrap(),
    );

    let sum = service
        .run("p1", "add", json!({"num1": 1e308, "num2": 1e308}))
        .await;
    assert!(matches!(sum, Err(CatalogError::Handler { ref function, .. }) if function == "add"));

    let total = service
        .run(
            "p1",
            "arrayArguments",
            json!({"arr1": [1.7e308], "arr2": [1.7e308]}),
        )
        .await;
    assert!(matches!(total, Err(CatalogError::Handler { .. })));
}

#[test]
fn test_handler_for_undeclared_function_fails_build() {
    let result = AlgorithmServiceBuilder::new(FunctionCatalog::new().unwrap())
        .with_function_fn("subtract", |_, _| Ok(json!({})))
        .build();
    assert!(matches!(result, Err(CatalogError::UnknownFunction(f)) if f == "subtract"));
}

#[test]
fn test_invalid_config_fails_build() {
    let result = AlgorithmServiceBuilder::new(FunctionCatalog::new().unwrap())
        .with_id("has space")
        .build();
    assert!(matches!(result, Err(CatalogError::InvalidConfiguration { .. })));

    let config = AlgorithmServiceConfig {
        app_name: String::new(),
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_builtins_skip_undeclared_functions() {
    let catalog = FunctionCatalog::from_json_str(
        r#"[{"title": "Now", "function": "now",
             "input": {"type": "object", "properties": {}},
             "output": {"type": "object", "properties": {"sysdate": {"title": "Time", "type": "string"}}}}]"#,
    )
    .unwrap();
    let service = AlgorithmServiceBuilder::new(catalog)
        .with_builtins()
        .build()
        .unwrap();
    assert_eq!(service.registered_functions(), vec!["now"]);
}

#[tokio::test]
async fn test_schema_returns_catalog_json() {
    let service = AlgorithmService::with_builtins().unwrap();
    let schema = service.schema().await.unwrap();
    assert_eq!(schema, embedded::default_catalog());
    let reloaded = FunctionCatalog::from_json_str(&schema).unwrap();
    assert_eq!(reloaded.descriptors(), service.catalog().descriptors());
    assert_eq!(service.id(), "function-catalog");
    assert_eq!(service.name(), "Function catalogue");
}

#[tokio::test]
async fn test_invoke_success_response() {
    let service = started(AlgorithmService::with_builtins().unwrap());
    let response = service
        .invoke(
            InvocationRequest::new("p1", "add", json!({"num1": 1, "num2": 1}))
                .with_request_id("req-1"),
        )
        .await;

    assert!(response.success);
    assert_eq!(response.data, Some(json!({"num1": 2})));
    assert_eq!(response.metadata.request_id, "req-1");
    assert_eq!(
        response.metadata.catalog_version,
        service.catalog_version().to_string()
    );
}

#[tokio::test]
async fn test_invoke_failure_response_generates_request_id() {
    let service = started(AlgorithmService::with_builtins().unwrap());
    let response = service
        .invoke(InvocationRequest::new("p1", "missing", json!({})))
        .await;

    assert!(!response.success);
    assert!(response.data.is_none());
    assert_eq!(response.error_code.as_deref(), Some("UNKNOWN_FUNCTION"));
    assert!(uuid::Uuid::parse_str(&response.metadata.request_id).is_ok());
}

#[tokio::test]
async fn test_concurrent_invocations_share_service() {
    let service = std::sync::Arc::new(started(AlgorithmService::with_builtins().unwrap()));
    let mut tasks = Vec::new();
    for i in 0..8 {
        let service = service.clone();
        tasks.push(tokio::spawn(async move {
            service
                .run("p1", "add", json!({"num1": i, "num2": i}))
                .await
        }));
    }
    for (i, task) in tasks.into_iter().enumerate() {
        let result = task.await.unwrap().unwrap();
        assert_eq!(result, json!({"num1": (i * 2) as i64}));
    }
}
