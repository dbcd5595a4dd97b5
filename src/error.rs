//! Error types for catalogue loading, validation and dispatch.
//!
//! Structural problems in catalogue data and mismatches between a call payload
//! and its schema are both reported as [`ValidationError`]. Everything that can
//! go wrong above that level (I/O, JSON syntax, dispatch) is a [`CatalogError`].

use std::fmt;
use std::path::PathBuf;

/// Main error type for catalogue operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A payload or descriptor violated a schema rule
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Catalogue data failed structural validation
    #[error("Catalogue failed validation with {} issue(s): {}", .issues.len(), IssueList(.issues))]
    InvalidCatalog { issues: Vec<SchemaIssue> },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalogue file could not be read
    #[error("Failed to read catalogue '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No descriptor with this function identifier
    #[error("Function '{0}' is not declared in the catalogue")]
    UnknownFunction(String),

    /// Descriptor exists but no handler was registered for it
    #[error("Function '{0}' has no registered handler")]
    NotImplemented(String),

    /// The application has not been started, or was stopped
    #[error("Application '{app_id}' is not running")]
    NotRunning { app_id: String },

    /// A handler reported a failure
    #[error("Function '{function}' failed: {message}")]
    Handler { function: String, message: String },

    /// Service configuration is unusable
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// A handler returned a value that does not match the output schema
    #[error("Function '{function}' returned a result that does not match its output schema: {source}")]
    OutputMismatch {
        function: String,
        #[source]
        source: ValidationError,
    },
}

/// A structural problem found in catalogue data, located by JSON path.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaIssue {
    /// Location of the offending node, e.g. `[3].input.properties.arr1.items`
    pub path: String,
    /// What is wrong at that location
    pub error: ValidationError,
}

impl SchemaIssue {
    pub fn new(path: impl Into<String>, error: ValidationError) -> Self {
        Self {
            path: path.into(),
            error,
        }
    }
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.error)
    }
}

struct IssueList<'a>(&'a [SchemaIssue]);

impl fmt::Display for IssueList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", issue)?;
        }
        Ok(())
    }
}

/// Validation errors for catalogue structure and call payloads.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Descriptor has an empty `function` identifier
    #[error("Function identifier cannot be empty")]
    EmptyFunctionName,

    /// Descriptor has an empty `title`
    #[error("Title cannot be empty")]
    EmptyTitle,

    /// Two descriptors share a `function` identifier
    #[error("Duplicate function identifier '{function}'")]
    DuplicateFunction { function: String },

    /// An `input`/`output` node is not of type "object"
    #[error("Schema must be of type 'object', got '{actual}'")]
    NotObjectSchema { actual: String },

    /// Property has no title
    #[error("Property '{property}' is missing a title")]
    MissingPropertyTitle { property: String },

    /// Property has no type
    #[error("Property '{property}' is missing a type")]
    MissingPropertyType { property: String },

    /// Array property does not declare an item type
    #[error("Array property '{property}' must declare an 'items' type")]
    MissingArrayItems { property: String },

    /// `required` names a property that is not declared
    #[error("Required property '{property}' is not declared in 'properties'")]
    UndeclaredRequired { property: String },

    /// `required` lists the same property twice
    #[error("Property '{property}' is listed more than once in 'required'")]
    DuplicateRequired { property: String },

    /// Payload is not a JSON object
    #[error("Payload must be a JSON object, got {actual}")]
    ExpectedObject { actual: String },

    /// Required parameter is missing or null
    #[error("Required parameter '{parameter}' is missing")]
    MissingRequiredParameter { parameter: String },

    /// Parameter value doesn't match the declared type
    #[error("Parameter '{parameter}' has invalid type, expected {expected}, got {actual}")]
    InvalidParameterType {
        parameter: String,
        expected: String,
        actual: String,
    },

    /// Payload carries a key the schema does not declare
    #[error("Unknown parameter '{parameter}'")]
    UnknownParameter { parameter: String },

    /// General validation error with custom message
    #[error("Validation failed: {message}")]
    Custom { message: String },
}

impl CatalogError {
    /// Create a handler failure error
    pub fn handler(function: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Handler {
            function: function.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create an I/O error bound to the path that failed
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Stable machine-readable code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidCatalog { .. } => "INVALID_CATALOG",
            Self::Json(_) => "JSON_ERROR",
            Self::Io { .. } => "IO_ERROR",
            Self::UnknownFunction(_) => "UNKNOWN_FUNCTION",
            Self::NotImplemented(_) => "NOT_IMPLEMENTED",
            Self::NotRunning { .. } => "NOT_RUNNING",
            Self::Handler { .. } => "HANDLER_ERROR",
            Self::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            Self::OutputMismatch { .. } => "OUTPUT_MISMATCH",
        }
    }
}

impl ValidationError {
    /// Create a missing required parameter error
    pub fn missing_required(parameter: impl Into<String>) -> Self {
        Self::MissingRequiredParameter {
            parameter: parameter.into(),
        }
    }

    /// Create an invalid type error
    pub fn invalid_type(
        parameter: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::InvalidParameterType {
            parameter: parameter.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a custom validation error
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom {
            message: message.into(),
        }
    }
}

// Result type aliases for convenience
pub type CatalogResult<T> = Result<T, CatalogError>;
pub type ValidationResult<T> = Result<T, ValidationError>;
