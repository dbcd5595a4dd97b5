//! Configuration and builder for [`AlgorithmService`].
//!
//! ```rust
//! use function_catalog::algorithm::AlgorithmServiceBuilder;
//! use function_catalog::schema::FunctionCatalog;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let service = AlgorithmServiceBuilder::new(FunctionCatalog::new()?)
//!     .with_id("math-app")
//!     .with_name("Math functions")
//!     .with_builtins()
//!     .build()?;
//! assert_eq!(service.registered_functions(), vec!["add", "abs", "now", "arrayArguments"]);
//! # Ok(())
//! # }
//! ```

use super::app::{FallbackHandler, FunctionHandler, handler_fn};
use super::builtins;
use super::service::AlgorithmService;
use crate::error::{CatalogError, CatalogResult};
use crate::schema::FunctionCatalog;

use log::{debug, warn};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Settings for an [`AlgorithmService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmServiceConfig {
    /// Stable application identifier
    pub app_id: String,
    /// Human-readable application name
    pub app_name: String,
    /// Accept call parameters that the input schema does not declare
    pub allow_unknown_parameters: bool,
    /// Fail calls whose result does not match the output schema, instead of
    /// logging a warning and returning the result anyway
    pub strict_output: bool,
}

impl Default for AlgorithmServiceConfig {
    fn default() -> Self {
        Self {
            app_id: "function-catalog".to_string(),
            app_name: "Function catalogue".to_string(),
            allow_unknown_parameters: false,
            strict_output: false,
        }
    }
}

impl AlgorithmServiceConfig {
    pub fn validate(&self) -> CatalogResult<()> {
        if self.app_id.trim().is_empty() {
            return Err(CatalogError::invalid_configuration(
                "Application id cannot be empty",
            ));
        }

        if self.app_id.chars().any(char::is_whitespace) {
            return Err(CatalogError::invalid_configuration(
                "Application id cannot contain whitespace",
            ));
        }

        if self.app_name.trim().is_empty() {
            return Err(CatalogError::invalid_configuration(
                "Application name cannot be empty",
            ));
        }

        Ok(())
    }
}

/// Builder for [`AlgorithmService`].
///
/// Handlers are keyed by function identifier; registering a second handler for
/// the same identifier replaces the first.
pub struct AlgorithmServiceBuilder {
    catalog: Arc<FunctionCatalog>,
    config: AlgorithmServiceConfig,
    handlers: HashMap<String, Arc<dyn FunctionHandler>>,
    fallback: Option<Arc<dyn FallbackHandler>>,
}

impl AlgorithmServiceBuilder {
    pub fn new(catalog: FunctionCatalog) -> Self {
        Self::with_shared_catalog(Arc::new(catalog))
    }

    /// Start from a catalogue that is shared with other owners.
    pub fn with_shared_catalog(catalog: Arc<FunctionCatalog>) -> Self {
        Self {
            catalog,
            config: AlgorithmServiceConfig::default(),
            handlers: HashMap::new(),
            fallback: None,
        }
    }

    pub fn with_config(mut self, config: AlgorithmServiceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_id(mut self, app_id: impl Into<String>) -> Self {
        self.config.app_id = app_id.into();
        self
    }

    pub fn with_name(mut self, app_name: impl Into<String>) -> Self {
        self.config.app_name = app_name.into();
        self
    }

    pub fn allow_unknown_parameters(mut self, allow: bool) -> Self {
        self.config.allow_unknown_parameters = allow;
        self
    }

    pub fn strict_output(mut self, strict: bool) -> Self {
        self.config.strict_output = strict;
        self
    }

    /// Register a handler for a catalogue function.
    pub fn with_function<H>(mut self, function: impl Into<String>, handler: H) -> Self
    where
        H: FunctionHandler + 'static,
    {
        self.handlers.insert(function.into(), Arc::new(handler));
        self
    }

    /// Register a closure as the handler for a catalogue function.
    pub fn with_function_fn<F>(self, function: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str, &Map<String, Value>) -> CatalogResult<Value> + Send + Sync + 'static,
    {
        self.with_function(function, handler_fn(f))
    }

    /// Register the builtin handlers for every builtin the catalogue declares.
    ///
    /// Builtins whose identifier is absent from the catalogue are skipped, and
    /// handlers registered earlier for the same identifier are kept.
    pub fn with_builtins(mut self) -> Self {
        for (name, handler) in builtins::all() {
            if !self.catalog.contains(name) {
                debug!("Skipping builtin '{}': not declared in the catalogue", name);
                continue;
            }
            self.handlers.entry(name.to_string()).or_insert(handler);
        }
        self
    }

    /// Handler used for declared functions that have no dedicated handler.
    ///
    /// Without a fallback such calls fail with [`CatalogError::NotImplemented`].
    pub fn with_fallback<H>(mut self, handler: H) -> Self
    where
        H: FallbackHandler + 'static,
    {
        self.fallback = Some(Arc::new(handler));
        self
    }

    /// Register a closure as the fallback handler.
    pub fn with_fallback_fn<F>(self, f: F) -> Self
    where
        F: Fn(&str, &str, &Map<String, Value>) -> CatalogResult<Value> + Send + Sync + 'static,
    {
        self.with_fallback(f)
    }

    /// Validate configuration and handler registrations and build the service.
    ///
    /// # Errors
    ///
    /// * [`CatalogError::InvalidConfiguration`] if the config is unusable
    /// * [`CatalogError::UnknownFunction`] if a handler targets a function the
    ///   catalogue does not declare
    pub fn build(self) -> CatalogResult<AlgorithmService> {
        self.config.validate()?;

        let mut registered: Vec<&String> = self.handlers.keys().collect();
        registered.sort();
        for function in registered {
            if !self.catalog.contains(function) {
                return Err(CatalogError::UnknownFunction(function.clone()));
            }
        }

        if self.fallback.is_none() {
            for function in self.catalog.function_names() {
                if !self.handlers.contains_key(function) {
                    warn!(
                        "Function '{}' is declared in the catalogue of '{}' but has no handler",
                        function, self.config.app_id
                    );
                }
            }
        }

        AlgorithmService::from_parts(self.catalog, self.config, self.handlers, self.fallback)
    }
}
