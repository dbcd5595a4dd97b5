//! Function descriptors, catalogue loading and schema validation.
//!
//! # Key Types
//!
//! - [`FunctionDescriptor`] - One callable operation with its input/output schemas
//! - [`FunctionCatalog`] - Ordered, validated, indexed list of descriptors
//! - [`PayloadValidator`] - Checks call parameters and results against schemas
//!
//! # Examples
//!
//! ```rust
//! use function_catalog::schema::FunctionCatalog;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = FunctionCatalog::new()?;
//! let add = catalog.get("add").expect("embedded catalogue declares add");
//! assert_eq!(add.required_parameters(), ["num1", "num2"]);
//! # Ok(())
//! # }
//! ```

pub mod embedded;
pub mod meta;
pub mod registry;
pub mod types;
pub mod validation;


pub use registry::FunctionCatalog;
pub use types::{FunctionDescriptor, ObjectSchema, PropertySchema, SchemaType};
pub use validation::PayloadValidator;
