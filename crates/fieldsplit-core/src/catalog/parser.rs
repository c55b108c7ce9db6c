//! Catalog parsing from YAML/JSON.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::schema::{catalog_violations, SchemaError};
use crate::types::EnumEntry;

/// Errors that can occur when loading catalogs.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Catalog does not match schema: {}", .0.join("; "))]
    SchemaViolation(Vec<String>),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// A named set of enum entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnumCatalog {
    /// Human-readable name
    #[serde(default)]
    pub name: Option<String>,

    /// Detailed description
    #[serde(default)]
    pub description: Option<String>,

    /// Allowed options, in definition order
    pub enums: Vec<EnumEntry>,
}

impl EnumCatalog {
    /// Parse a catalog from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let document: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        let value = serde_json::to_value(document)?;
        Self::from_value(value)
    }

    /// Parse a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Parse a catalog from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse a catalog from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse a catalog file, choosing JSON for a `.json` extension and YAML
    /// otherwise.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_file(path)
        } else {
            Self::from_yaml_file(path)
        }
    }

    fn from_value(value: serde_json::Value) -> Result<Self, CatalogError> {
        let violations = catalog_violations(&value)?;
        if !violations.is_empty() {
            return Err(CatalogError::SchemaViolation(violations));
        }
        let catalog: EnumCatalog = serde_json::from_value(value)?;

        tracing::debug!(
            name = catalog.name.as_deref().unwrap_or("<unnamed>"),
            entries = catalog.len(),
            "Loaded enum catalog"
        );

        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.enums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }
}
