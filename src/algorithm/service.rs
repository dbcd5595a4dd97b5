//! In-process dispatch of catalogue functions.
//!
//! [`AlgorithmService`] ties a [`FunctionCatalog`] to a set of handlers. Every
//! call is checked against the descriptor's input schema before it reaches a
//! handler, and every result is checked against the output schema afterwards.

use super::app::{AlgorithmApp, FallbackHandler, FunctionHandler};
use super::builder::{AlgorithmServiceBuilder, AlgorithmServiceConfig};
use crate::error::{CatalogError, CatalogResult, ValidationError};
use crate::schema::{FunctionCatalog, PayloadValidator, SchemaType};
use crate::version::CatalogVersion;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Catalogue-backed algorithm application.
pub struct AlgorithmService {
    catalog: Arc<FunctionCatalog>,
    version: CatalogVersion,
    config: AlgorithmServiceConfig,
    handlers: HashMap<String, Arc<dyn FunctionHandler>>,
    fallback: Option<Arc<dyn FallbackHandler>>,
    running: AtomicBool,
}

/// Structured request for a single function call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationRequest {
    /// Project on whose behalf the function runs
    pub project_id: String,
    /// Catalogue function identifier
    pub function: String,
    /// Call parameters, checked against the input schema
    #[serde(default = "empty_params")]
    pub params: Value,
    /// Request ID for tracing (generated if not provided)
    #[serde(default)]
    pub request_id: Option<String>,
}

fn empty_params() -> Value {
    Value::Object(Default::default())
}

impl InvocationRequest {
    pub fn new(project_id: impl Into<String>, function: impl Into<String>, params: Value) -> Self {
        Self {
            project_id: project_id.into(),
            function: function.into(),
            params,
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

/// Structured response from [`AlgorithmService::invoke`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationResponse {
    /// Whether the call succeeded
    pub success: bool,
    /// Handler result on success
    pub data: Option<Value>,
    /// Error message on failure
    pub error: Option<String>,
    /// Error code for programmatic handling
    pub error_code: Option<String>,
    pub metadata: InvocationMetadata,
}

/// Metadata about a call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationMetadata {
    pub request_id: String,
    pub project_id: String,
    pub function: String,
    /// Fingerprint of the catalogue the call was checked against
    pub catalog_version: String,
}

impl AlgorithmService {
    /// Start building a service over `catalog`.
    pub fn builder(catalog: FunctionCatalog) -> AlgorithmServiceBuilder {
        AlgorithmServiceBuilder::new(catalog)
    }

    /// The embedded catalogue with every builtin handler registered.
    pub fn with_builtins() -> CatalogResult<Self> {
        AlgorithmServiceBuilder::new(FunctionCatalog::new()?)
            .with_builtins()
            .build()
    }

    pub(super) fn from_parts(
        catalog: Arc<FunctionCatalog>,
        config: AlgorithmServiceConfig,
        handlers: HashMap<String, Arc<dyn FunctionHandler>>,
        fallback: Option<Arc<dyn FallbackHandler>>,
    ) -> CatalogResult<Self> {
        let version = catalog.version()?;
        debug!(
            "Built algorithm service '{}' over catalogue {} with {} handler(s)",
            config.app_id,
            version,
            handlers.len()
        );

        Ok(Self {
            catalog,
            version,
            config,
            handlers,
            fallback,
            running: AtomicBool::new(false),
        })
    }

    pub fn catalog(&self) -> &FunctionCatalog {
        &self.catalog
    }

    pub fn catalog_version(&self) -> &CatalogVersion {
        &self.version
    }

    pub fn config(&self) -> &AlgorithmServiceConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Functions with a dedicated handler, in catalogue order.
    pub fn registered_functions(&self) -> Vec<&str> {
        self.catalog
            .function_names()
            .into_iter()
            .filter(|f| self.handlers.contains_key(*f))
            .collect()
    }

    /// Run a structured request and fold the outcome into a response.
    pub async fn invoke(&self, request: InvocationRequest) -> InvocationResponse {
        let request_id = request
            .request_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        info!(
            "Algorithm '{}' invoking '{}' for project '{}' (request: '{}')",
            self.config.app_id, request.function, request.project_id, request_id
        );

        let metadata = InvocationMetadata {
            request_id: request_id.clone(),
            project_id: request.project_id.clone(),
            function: request.function.clone(),
            catalog_version: self.version.to_string(),
        };

        match self
            .run(&request.project_id, &request.function, request.params)
            .await
        {
            Ok(data) => {
                debug!("Invocation completed successfully (request: '{}')", request_id);
                InvocationResponse {
                    success: true,
                    data: Some(data),
                    error: None,
                    error_code: None,
                    metadata,
                }
            }
            Err(e) => {
                warn!("Invocation failed: {} (request: '{}')", e, request_id);
                InvocationResponse {
                    success: false,
                    data: None,
                    error: Some(e.to_string()),
                    error_code: Some(e.error_code().to_string()),
                    metadata,
                }
            }
        }
    }

    fn input_validator(&self) -> PayloadValidator {
        PayloadValidator {
            allow_unknown_properties: self.config.allow_unknown_parameters,
        }
    }

    fn check_output(&self, function: &str, result: &Value) -> CatalogResult<()> {
        let Some(descriptor) = self.catalog.get(function) else {
            return Ok(());
        };

        match PayloadValidator::strict().validate_output(descriptor, result) {
            Ok(()) => Ok(()),
            Err(source) if self.config.strict_output => Err(CatalogError::OutputMismatch {
                function: function.to_string(),
                source,
            }),
            Err(e) => {
                warn!(
                    "Function '{}' returned a result outside its output schema: {}",
                    function, e
                );
                Ok(())
            }
        }
    }
}

#[async_trait]
impl AlgorithmApp for AlgorithmService {
    fn id(&self) -> &str {
        &self.config.app_id
    }

    fn name(&self) -> &str {
        &self.config.app_name
    }

    fn start(&self) -> CatalogResult<()> {
        if self.running.swap(true, Ordering::SeqCst) {
            debug!("Algorithm '{}' already running", self.config.app_id);
        } else {
            info!(
                "Algorithm '{}' ({}) started with {} function(s)",
                self.config.app_id,
                self.config.app_name,
                self.catalog.len()
            );
        }
        Ok(())
    }

    fn stop(&self) -> CatalogResult<()> {
        if self.running.swap(false, Ordering::SeqCst) {
            info!("Algorithm '{}' stopped", self.config.app_id);
        }
        Ok(())
    }

    async fn schema(&self) -> CatalogResult<String> {
        self.catalog.published_json()
    }

    async fn run(&self, project_id: &str, function: &str, params: Value) -> CatalogResult<Value> {
        if !self.is_running() {
            return Err(CatalogError::NotRunning {
                app_id: self.config.app_id.clone(),
            });
        }

        let descriptor = self
            .catalog
            .get(function)
            .ok_or_else(|| CatalogError::UnknownFunction(function.to_string()))?;

        self.input_validator().validate_input(descriptor, &params)?;
        let params = match params {
            Value::Object(map) => map,
            other => {
                return Err(ValidationError::ExpectedObject {
                    actual: SchemaType::of_value(&other).to_string(),
                }
                .into());
            }
        };

        debug!(
            "Running '{}' for project '{}' with params {:?}",
            function, project_id, params
        );

        let result = match (self.handlers.get(function), &self.fallback) {
            (Some(handler), _) => handler.call(project_id, &params).await?,
            (None, Some(fallback)) => fallback.call(project_id, function, &params).await?,
            (None, None) => return Err(CatalogError::NotImplemented(function.to_string())),
        };

        self.check_output(function, &result)?;
        Ok(result)
    }
}
