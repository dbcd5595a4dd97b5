//! Payload validation against descriptor schemas.
//!
//! Checks concrete call parameters and results against the `input`/`output`
//! schema of a descriptor. Validation stops at the first violation.

use super::registry::FunctionCatalog;
use super::types::{FunctionDescriptor, ObjectSchema, PropertySchema, SchemaType};
use crate::error::{CatalogError, CatalogResult, ValidationError, ValidationResult};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Validates JSON payloads against object schemas.
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadValidator {
    /// Accept keys that the schema does not declare
    pub allow_unknown_properties: bool,
}

impl PayloadValidator {
    /// A validator that rejects undeclared keys.
    pub fn strict() -> Self {
        Self {
            allow_unknown_properties: false,
        }
    }

    /// A validator that ignores undeclared keys.
    pub fn lenient() -> Self {
        Self {
            allow_unknown_properties: true,
        }
    }

    /// Validate a payload against an object schema.
    pub fn validate(&self, schema: &ObjectSchema, payload: &Value) -> ValidationResult<()> {
        let obj = payload
            .as_object()
            .ok_or_else(|| ValidationError::ExpectedObject {
                actual: SchemaType::of_value(payload).to_string(),
            })?;
        self.validate_object(&schema.properties, &schema.required, obj, "")
    }

    /// Validate call parameters against a descriptor's input schema.
    pub fn validate_input(
        &self,
        descriptor: &FunctionDescriptor,
        params: &Value,
    ) -> ValidationResult<()> {
        self.validate(&descriptor.input, params)
    }

    /// Validate a result against a descriptor's output schema.
    pub fn validate_output(
        &self,
        descriptor: &FunctionDescriptor,
        result: &Value,
    ) -> ValidationResult<()> {
        self.validate(&descriptor.output, result)
    }

    fn validate_object(
        &self,
        properties: &BTreeMap<String, PropertySchema>,
        required: &[String],
        obj: &Map<String, Value>,
        prefix: &str,
    ) -> ValidationResult<()> {
        for name in required {
            match obj.get(name) {
                None | Some(Value::Null) => {
                    return Err(ValidationError::missing_required(qualify(prefix, name)));
                }
                Some(_) => {}
            }
        }

        for (name, value) in obj {
            let qualified = qualify(prefix, name);
            match properties.get(name) {
                Some(property) => {
                    // Optional parameters may be passed explicitly as null.
                    if value.is_null() && !required.contains(name) {
                        continue;
                    }
                    self.validate_value(property, value, &qualified)?;
                }
                None if self.allow_unknown_properties => {}
                None => {
                    return Err(ValidationError::UnknownParameter {
                        parameter: qualified,
                    });
                }
            }
        }

        Ok(())
    }

    fn validate_value(
        &self,
        property: &PropertySchema,
        value: &Value,
        name: &str,
    ) -> ValidationResult<()> {
        // Untyped properties accept anything.
        let Some(expected) = property.schema_type else {
            return Ok(());
        };

        if !expected.matches(value) {
            return Err(ValidationError::invalid_type(
                name,
                expected.as_str(),
                SchemaType::of_value(value),
            ));
        }

        match (expected, value) {
            (SchemaType::Array, Value::Array(elements)) => {
                if let Some(items) = property.items.as_deref() {
                    for (i, element) in elements.iter().enumerate() {
                        self.validate_value(items, element, &format!("{}[{}]", name, i))?;
                    }
                }
            }
            (SchemaType::Object, Value::Object(obj)) if !property.properties.is_empty() => {
                self.validate_object(&property.properties, &property.required, obj, name)?;
            }
            _ => {}
        }

        Ok(())
    }
}

fn qualify(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

impl FunctionCatalog {
    /// Validate call parameters for a function declared in this catalogue.
    pub fn validate_params(
        &self,
        function: &str,
        params: &Value,
        validator: PayloadValidator,
    ) -> CatalogResult<()> {
        let descriptor = self
            .get(function)
            .ok_or_else(|| CatalogError::UnknownFunction(function.to_string()))?;
        validator.validate_input(descriptor, params)?;
        Ok(())
    }

    /// Validate a result for a function declared in this catalogue.
    pub fn validate_result(
        &self,
        function: &str,
        result: &Value,
        validator: PayloadValidator,
    ) -> CatalogResult<()> {
        let descriptor = self
            .get(function)
            .ok_or_else(|| CatalogError::UnknownFunction(function.to_string()))?;
        validator.validate_output(descriptor, result)?;
        Ok(())
    }
}
