//! Algorithm applications built on a function catalogue.
//!
//! An algorithm application publishes its catalogue through
//! [`AlgorithmApp::schema`] and executes catalogue functions through
//! [`AlgorithmApp::run`]. [`AlgorithmService`] is the catalogue-backed
//! implementation: handlers are registered per function identifier, and calls
//! are checked against the descriptor schemas on the way in and out.
//!
//! ```rust
//! use function_catalog::algorithm::{AlgorithmApp, AlgorithmService};
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let service = AlgorithmService::with_builtins()?;
//! service.start()?;
//! let sum = service.run("project-1", "add", json!({"num1": 1, "num2": 2})).await?;
//! assert_eq!(sum, json!({"num1": 3}));
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod builder;
pub mod builtins;
pub mod service;

#[cfg(test)]
mod tests;

pub use app::{AlgorithmApp, FallbackHandler, FnHandler, FunctionHandler, handler_fn};
pub use builder::{AlgorithmServiceBuilder, AlgorithmServiceConfig};
pub use service::{AlgorithmService, InvocationMetadata, InvocationRequest, InvocationResponse};
