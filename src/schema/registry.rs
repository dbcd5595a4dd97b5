//! Function catalogue loading and lookup.
//!
//! [`FunctionCatalog`] is the loaded form of a catalogue file. Loading parses
//! the JSON array, runs every structural check from [`super::meta`], and builds
//! an index by function identifier. Once built, a catalogue is immutable.

use super::{
    embedded, meta,
    types::{FunctionDescriptor, SchemaType},
};
use crate::error::{CatalogError, CatalogResult};
use crate::version::CatalogVersion;

use log::{debug, trace};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Ordered, validated and indexed list of function descriptors.
#[derive(Debug, Clone)]
pub struct FunctionCatalog {
    descriptors: Vec<FunctionDescriptor>,
    index: HashMap<String, usize>,
    source: Option<String>,
}

impl FunctionCatalog {
    /// Create a catalogue from the embedded default catalogue.
    pub fn new() -> CatalogResult<Self> {
        Self::with_embedded_catalog()
    }

    /// Create a catalogue from the embedded default catalogue.
    ///
    /// Needs no external files.
    pub fn with_embedded_catalog() -> CatalogResult<Self> {
        Self::from_json_str(embedded::default_catalog())
    }

    /// Load a catalogue from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let path = path.as_ref();
        debug!("Loading function catalogue from {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        Self::from_json_str(&content)
    }

    /// Load a catalogue from a JSON string.
    ///
    /// The text is retained and available through [`Self::source_text`].
    pub fn from_json_str(content: &str) -> CatalogResult<Self> {
        let descriptors: Vec<FunctionDescriptor> = serde_json::from_str(content)?;
        let mut catalog = Self::from_descriptors(descriptors)?;
        catalog.source = Some(content.to_string());
        Ok(catalog)
    }

    /// Build a catalogue from already-parsed descriptors.
    ///
    /// Fails with [`CatalogError::InvalidCatalog`] listing every structural
    /// issue when any descriptor is malformed.
    pub fn from_descriptors(descriptors: Vec<FunctionDescriptor>) -> CatalogResult<Self> {
        let issues = meta::validate_descriptors(&descriptors);
        if !issues.is_empty() {
            debug!("Function catalogue rejected with {} issue(s)", issues.len());
            return Err(CatalogError::InvalidCatalog { issues });
        }

        let index = descriptors
            .iter()
            .enumerate()
            .map(|(i, d)| (d.function.clone(), i))
            .collect();

        for descriptor in &descriptors {
            trace!(
                "Registered function '{}' ({} parameter(s))",
                descriptor.function,
                descriptor.input.properties.len()
            );
        }
        debug!("Loaded function catalogue with {} function(s)", descriptors.len());

        Ok(Self {
            descriptors,
            index,
            source: None,
        })
    }

    /// Get a descriptor by function identifier.
    pub fn get(&self, function: &str) -> Option<&FunctionDescriptor> {
        self.index.get(function).map(|&i| &self.descriptors[i])
    }

    pub fn contains(&self, function: &str) -> bool {
        self.index.contains_key(function)
    }

    /// All descriptors in catalogue order.
    pub fn descriptors(&self) -> &[FunctionDescriptor] {
        &self.descriptors
    }

    /// Function identifiers in catalogue order.
    pub fn function_names(&self) -> Vec<&str> {
        self.descriptors.iter().map(|d| d.function.as_str()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FunctionDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// The text this catalogue was parsed from, if it was loaded from JSON.
    pub fn source_text(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Catalogue JSON as published: the source text when there is one,
    /// otherwise the indented serialization.
    pub fn published_json(&self) -> CatalogResult<String> {
        match &self.source {
            Some(source) => Ok(source.clone()),
            None => self.to_json_pretty(),
        }
    }

    /// Serialize back to compact catalogue JSON.
    pub fn to_json_string(&self) -> CatalogResult<String> {
        Ok(serde_json::to_string(&self.descriptors)?)
    }

    /// Serialize back to indented catalogue JSON.
    pub fn to_json_pretty(&self) -> CatalogResult<String> {
        Ok(serde_json::to_string_pretty(&self.descriptors)?)
    }

    /// Content fingerprint of this catalogue.
    ///
    /// Computed over the compact serialization, so formatting differences in
    /// the source file do not change the version.
    pub fn version(&self) -> CatalogResult<CatalogVersion> {
        let content = serde_json::to_vec(&self.descriptors)?;
        Ok(CatalogVersion::from_content(&content))
    }

    /// Count of input parameters per declared type across the catalogue.
    pub fn parameter_type_counts(&self) -> HashMap<SchemaType, usize> {
        let mut counts = HashMap::new();
        for descriptor in &self.descriptors {
            for property in descriptor.input.properties.values() {
                if let Some(t) = property.schema_type {
                    *counts.entry(t).or_insert(0) += 1;
                }
            }
        }
        counts
    }
}

impl<'a> IntoIterator for &'a FunctionCatalog {
    type Item = &'a FunctionDescriptor;
    type IntoIter = std::slice::Iter<'a, FunctionDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.iter()
    }
}
