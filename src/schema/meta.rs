//! Structural validation of catalogue data.
//!
//! These checks enforce the shape every well-formed catalogue has: non-empty,
//! unique function identifiers; object-typed `input`/`output` nodes; titled,
//! typed properties; arrays that declare an item type; and `required` lists
//! that only name declared properties. Unlike payload validation, which stops
//! at the first problem, every issue is collected so a catalogue author can fix
//! them in one pass.

use super::types::{FunctionDescriptor, ObjectSchema, PropertySchema, SchemaType};
use crate::error::{SchemaIssue, ValidationError};
use std::collections::{BTreeMap, HashSet};

/// Validate a whole catalogue, including identifier uniqueness.
pub fn validate_descriptors(descriptors: &[FunctionDescriptor]) -> Vec<SchemaIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for (index, descriptor) in descriptors.iter().enumerate() {
        issues.extend(validate_descriptor(descriptor, index));

        if !descriptor.function.trim().is_empty() && !seen.insert(descriptor.function.as_str()) {
            issues.push(SchemaIssue::new(
                format!("[{}].function", index),
                ValidationError::DuplicateFunction {
                    function: descriptor.function.clone(),
                },
            ));
        }
    }

    issues
}

/// Validate a single descriptor located at `index` in its catalogue.
pub fn validate_descriptor(descriptor: &FunctionDescriptor, index: usize) -> Vec<SchemaIssue> {
    let mut issues = Vec::new();
    let base = format!("[{}]", index);

    if descriptor.function.trim().is_empty() {
        issues.push(SchemaIssue::new(
            format!("{}.function", base),
            ValidationError::EmptyFunctionName,
        ));
    }

    if descriptor.title.trim().is_empty() {
        issues.push(SchemaIssue::new(
            format!("{}.title", base),
            ValidationError::EmptyTitle,
        ));
    }

    validate_object_schema(&descriptor.input, &format!("{}.input", base), &mut issues);
    validate_object_schema(&descriptor.output, &format!("{}.output", base), &mut issues);

    issues
}

fn validate_object_schema(schema: &ObjectSchema, path: &str, issues: &mut Vec<SchemaIssue>) {
    match schema.schema_type {
        Some(SchemaType::Object) => {}
        Some(other) => issues.push(SchemaIssue::new(
            format!("{}.type", path),
            ValidationError::NotObjectSchema {
                actual: other.to_string(),
            },
        )),
        None => issues.push(SchemaIssue::new(
            format!("{}.type", path),
            ValidationError::NotObjectSchema {
                actual: "none".to_string(),
            },
        )),
    }

    validate_properties(&schema.properties, &schema.required, path, issues);
}

fn validate_properties(
    properties: &BTreeMap<String, PropertySchema>,
    required: &[String],
    path: &str,
    issues: &mut Vec<SchemaIssue>,
) {
    for (name, property) in properties {
        let property_path = format!("{}.properties.{}", path, name);
        validate_property(name, property, &property_path, issues);
    }

    let mut seen = HashSet::new();
    for name in required {
        if !seen.insert(name.as_str()) {
            issues.push(SchemaIssue::new(
                format!("{}.required", path),
                ValidationError::DuplicateRequired {
                    property: name.clone(),
                },
            ));
        } else if !properties.contains_key(name) {
            issues.push(SchemaIssue::new(
                format!("{}.required", path),
                ValidationError::UndeclaredRequired {
                    property: name.clone(),
                },
            ));
        }
    }
}

fn validate_property(
    name: &str,
    property: &PropertySchema,
    path: &str,
    issues: &mut Vec<SchemaIssue>,
) {
    if property.title.as_deref().is_none_or(|t| t.trim().is_empty()) {
        issues.push(SchemaIssue::new(
            format!("{}.title", path),
            ValidationError::MissingPropertyTitle {
                property: name.to_string(),
            },
        ));
    }

    match property.schema_type {
        None => issues.push(SchemaIssue::new(
            format!("{}.type", path),
            ValidationError::MissingPropertyType {
                property: name.to_string(),
            },
        )),
        Some(SchemaType::Array) => validate_items(name, property, path, issues),
        Some(SchemaType::Object) => {
            validate_properties(&property.properties, &property.required, path, issues)
        }
        Some(_) => {}
    }
}

fn validate_items(name: &str, property: &PropertySchema, path: &str, issues: &mut Vec<SchemaIssue>) {
    let items_path = format!("{}.items", path);
    let Some(items) = property.items.as_deref() else {
        issues.push(SchemaIssue::new(
            items_path,
            ValidationError::MissingArrayItems {
                property: name.to_string(),
            },
        ));
        return;
    };

    // Item schemas are anonymous, so only the type is mandatory.
    match items.schema_type {
        None => issues.push(SchemaIssue::new(
            format!("{}.type", items_path),
            ValidationError::MissingArrayItems {
                property: name.to_string(),
            },
        )),
        Some(SchemaType::Array) => validate_items(name, items, &items_path, issues),
        Some(SchemaType::Object) => {
            validate_properties(&items.properties, &items.required, &items_path, issues)
        }
        Some(_) => {}
    }
}
