//! Core type definitions for function catalogues.
//!
//! A catalogue is an ordered list of [`FunctionDescriptor`]s. Each descriptor
//! pairs a function identifier with two JSON-Schema-style object schemas: one
//! for the parameters it accepts and one for the result it returns.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// One callable operation in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    /// Human-readable title
    #[serde(default)]
    pub title: String,
    /// Function identifier, unique within the catalogue
    #[serde(default)]
    pub function: String,
    /// Shape of the parameters accepted by the function
    pub input: ObjectSchema,
    /// Shape of the value returned by the function
    pub output: ObjectSchema,
}

impl FunctionDescriptor {
    /// Names of the input parameters that must be supplied.
    pub fn required_parameters(&self) -> &[String] {
        &self.input.required
    }

    /// Look up an input parameter definition.
    pub fn parameter(&self, name: &str) -> Option<&PropertySchema> {
        self.input.properties.get(name)
    }

    /// Look up an output field definition.
    pub fn result_field(&self, name: &str) -> Option<&PropertySchema> {
        self.output.properties.get(name)
    }
}

/// A JSON-Schema-style object: named properties plus a required list.
///
/// Used for both parameter schemas (`input`) and result schemas (`output`),
/// which are structurally identical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSchema {
    /// Node type; well-formed catalogues always use `object` here
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    /// Property definitions keyed by property name
    #[serde(default)]
    pub properties: BTreeMap<String, PropertySchema>,
    /// Names of properties that must be present
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl ObjectSchema {
    /// An empty object schema with no properties.
    pub fn empty() -> Self {
        Self {
            schema_type: Some(SchemaType::Object),
            properties: BTreeMap::new(),
            required: Vec::new(),
        }
    }

    /// Add a property, returning the updated schema.
    pub fn with_property(mut self, name: impl Into<String>, property: PropertySchema) -> Self {
        self.properties.insert(name.into(), property);
        self
    }

    /// Mark a property as required, returning the updated schema.
    pub fn with_required(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

impl Default for ObjectSchema {
    fn default() -> Self {
        Self::empty()
    }
}

/// Definition of a single named property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySchema {
    /// Human-readable title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Value type
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Element constraint for array properties
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<PropertySchema>>,
    /// Nested properties for object-typed properties
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, PropertySchema>,
    /// Required nested properties for object-typed properties
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl PropertySchema {
    /// A titled property of the given type.
    pub fn new(title: impl Into<String>, schema_type: SchemaType) -> Self {
        Self {
            title: Some(title.into()),
            schema_type: Some(schema_type),
            description: None,
            items: None,
            properties: BTreeMap::new(),
            required: Vec::new(),
        }
    }

    /// A titled array property whose elements have the given type.
    pub fn array_of(title: impl Into<String>, item_type: SchemaType) -> Self {
        let mut property = Self::new(title, SchemaType::Array);
        property.items = Some(Box::new(Self::untitled(item_type)));
        property
    }

    /// A property with a type but no title, as used for `items`.
    pub fn untitled(schema_type: SchemaType) -> Self {
        Self {
            title: None,
            ..Self::new("", schema_type)
        }
    }

    /// View the nested properties of an object-typed property as an object schema.
    pub fn as_object_schema(&self) -> ObjectSchema {
        ObjectSchema {
            schema_type: Some(SchemaType::Object),
            properties: self.properties.clone(),
            required: self.required.clone(),
        }
    }
}

/// JSON Schema primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
}

impl SchemaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Null => "null",
        }
    }

    /// Whether a JSON value is an instance of this type.
    ///
    /// `number` accepts any JSON number; `integer` accepts numbers without a
    /// fractional part, including floats such as `2.0`.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => {
                value.is_i64()
                    || value.is_u64()
                    || value.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0)
            }
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
            Self::Null => value.is_null(),
        }
    }

    /// Name of the JSON type of a value, for error messages.
    pub fn of_value(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
