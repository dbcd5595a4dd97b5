//! End-to-end calls through an algorithm service built on a custom catalogue.

use crate::common::{init_logging, math_catalog, scale};
use function_catalog::algorithm::builtins;
use function_catalog::{
    AlgorithmApp, AlgorithmService, AlgorithmServiceBuilder, AlgorithmServiceConfig,
    InvocationRequest,
};
use serde_json::json;

fn math_service() -> AlgorithmService {
    let service = AlgorithmServiceBuilder::new(math_catalog())
        .with_config(AlgorithmServiceConfig {
            app_id: "math".to_string(),
            app_name: "Math functions".to_string(),
            strict_output: true,
            ..Default::default()
        })
        .with_builtins()
        .with_function_fn("scale", scale)
        .build()
        .expect("math service should build");
    service.start().unwrap();
    service
}

#[tokio::test]
async fn test_custom_catalog_with_builtin_and_custom_handlers() {
    init_logging();
    let service = math_service();

    assert_eq!(service.id(), "math");
    assert_eq!(service.registered_functions(), vec!["add", "scale"]);

    let sum = service
        .run("project-a", "add", json!({"num1": 40, "num2": 2}))
        .await
        .unwrap();
    assert_eq!(sum, json!({"num1": 42}));

    let scaled = service
        .run("project-a", "scale", json!({"vector": [1, 2.5], "factor": 2}))
        .await
        .unwrap();
    assert_eq!(scaled, json!({"vector": [2.0, 5.0]}));
}

#[tokio::test]
async fn test_invoke_reports_validation_failures() {
    init_logging();
    let service = math_service();

    let response = service
        .invoke(InvocationRequest::new(
            "project-a",
            "scale",
            json!({"vector": [1, "two"], "factor": 2}),
        ))
        .await;

    assert!(!response.success);
    assert_eq!(response.error_code.as_deref(), Some("VALIDATION_ERROR"));
    assert!(response.error.unwrap().contains("vector[1]"));
    assert_eq!(response.metadata.function, "scale");
    assert_eq!(response.metadata.project_id, "project-a");
}

#[tokio::test]
async fn test_request_deserializes_without_params() {
    let service = AlgorithmService::with_builtins().unwrap();
    service.start().unwrap();

    let request: InvocationRequest =
        serde_json::from_value(json!({"project_id": "p", "function": "now"})).unwrap();
    let response = service.invoke(request).await;

    assert!(response.success);
    let sysdate = response.data.unwrap()["sysdate"].as_str().unwrap().to_string();
    assert!(chrono::NaiveDateTime::parse_from_str(&sysdate, builtins::SYSDATE_FORMAT).is_ok());
}

#[tokio::test]
async fn test_stopped_service_rejects_invocations() {
    let service = math_service();
    service.stop().unwrap();

    let response = service
        .invoke(InvocationRequest::new("p", "add", json!({"num1": 1, "num2": 1})))
        .await;
    assert_eq!(response.error_code.as_deref(), Some("NOT_RUNNING"));
}
