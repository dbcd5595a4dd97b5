//! Traits for algorithm applications and their function handlers.

use crate::error::CatalogResult;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Implementation of one catalogue function.
///
/// Handlers receive parameters that have already been checked against the
/// function's input schema, so required keys are present and typed.
#[async_trait]
pub trait FunctionHandler: Send + Sync {
    async fn call(&self, project_id: &str, params: &Map<String, Value>) -> CatalogResult<Value>;
}

/// Adapter that turns a synchronous closure into a [`FunctionHandler`].
pub struct FnHandler<F> {
    f: F,
}

/// Wrap a closure as a [`FunctionHandler`].
///
/// ```rust
/// use function_catalog::algorithm::{FunctionHandler, handler_fn};
/// use serde_json::json;
///
/// let double = handler_fn(|_project, params| {
///     let n = params.get("n").and_then(|v| v.as_f64()).unwrap_or_default();
///     Ok(json!({ "n": n * 2.0 }))
/// });
/// ```
pub fn handler_fn<F>(f: F) -> FnHandler<F>
where
    F: Fn(&str, &Map<String, Value>) -> CatalogResult<Value> + Send + Sync,
{
    FnHandler { f }
}

#[async_trait]
impl<F> FunctionHandler for FnHandler<F>
where
    F: Fn(&str, &Map<String, Value>) -> CatalogResult<Value> + Send + Sync,
{
    async fn call(&self, project_id: &str, params: &Map<String, Value>) -> CatalogResult<Value> {
        (self.f)(project_id, params)
    }
}

/// Catch-all for declared functions that have no dedicated handler.
#[async_trait]
pub trait FallbackHandler: Send + Sync {
    async fn call(
        &self,
        project_id: &str,
        function: &str,
        params: &Map<String, Value>,
    ) -> CatalogResult<Value>;
}

#[async_trait]
impl<F> FallbackHandler for F
where
    F: Fn(&str, &str, &Map<String, Value>) -> CatalogResult<Value> + Send + Sync,
{
    async fn call(
        &self,
        project_id: &str,
        function: &str,
        params: &Map<String, Value>,
    ) -> CatalogResult<Value> {
        self(project_id, function, params)
    }
}

/// An application that publishes a function catalogue and runs its functions.
///
/// `schema` returns the catalogue text exactly as a caller would consume it;
/// `run` executes one function on behalf of a project.
#[async_trait]
pub trait AlgorithmApp: Send + Sync {
    /// Stable application identifier
    fn id(&self) -> &str;

    /// Human-readable application name
    fn name(&self) -> &str;

    fn start(&self) -> CatalogResult<()>;

    fn stop(&self) -> CatalogResult<()>;

    /// The function catalogue as JSON text.
    async fn schema(&self) -> CatalogResult<String>;

    /// Execute `function` with `params` for `project_id`.
    async fn run(&self, project_id: &str, function: &str, params: Value) -> CatalogResult<Value>;
}
