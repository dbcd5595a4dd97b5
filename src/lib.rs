//! Function catalogues for Rust.
//!
//! A function catalogue is an ordered list of function descriptors, each with a
//! title, a function identifier, and JSON-Schema-style input and output
//! schemas. This crate loads catalogues, checks their structure, validates call
//! payloads against them, and dispatches calls to in-process handlers.
//!
//! # Core Components
//!
//! - [`FunctionCatalog`] - Loaded, validated and indexed catalogue
//! - [`PayloadValidator`] - Checks parameters and results against descriptor schemas
//! - [`AlgorithmService`] - Catalogue-backed application that runs functions
//!
//! # Quick Start
//!
//! ```rust
//! use function_catalog::FunctionCatalog;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = FunctionCatalog::new()?;
//! for descriptor in &catalog {
//!     println!("{} - {}", descriptor.function, descriptor.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod algorithm;
pub mod error;
pub mod schema;
pub mod version;

// Re-export commonly used types for convenience
pub use algorithm::{
    AlgorithmApp, AlgorithmService, AlgorithmServiceBuilder, AlgorithmServiceConfig,
    FunctionHandler, InvocationRequest, InvocationResponse,
};
pub use error::{CatalogError, CatalogResult, SchemaIssue, ValidationError, ValidationResult};
pub use schema::{
    FunctionCatalog, FunctionDescriptor, ObjectSchema, PayloadValidator, PropertySchema,
    SchemaType,
};
pub use version::CatalogVersion;
