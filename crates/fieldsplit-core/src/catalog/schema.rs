//! JSON Schema checks for enum catalogs.

use std::sync::OnceLock;
use thiserror::Error;

const CATALOG_SCHEMA_JSON: &str = include_str!("../../schema/enum_catalog.schema.json");

static CATALOG_VALIDATOR: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();

/// The embedded schema could not be parsed or compiled.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Failed to load schema: {0}")]
    LoadError(String),
}

fn catalog_validator() -> Result<&'static jsonschema::Validator, SchemaError> {
    CATALOG_VALIDATOR
        .get_or_init(|| {
            let schema: serde_json::Value = serde_json::from_str(CATALOG_SCHEMA_JSON)
                .map_err(|e| format!("invalid schema JSON: {}", e))?;
            jsonschema::options()
                .build(&schema)
                .map_err(|e| format!("schema does not compile: {}", e))
        })
        .as_ref()
        .map_err(|reason| SchemaError::LoadError(reason.clone()))
}

/// Every way `document` departs from the catalog schema, as
/// `"<message> at <path>"`. Empty when the document conforms.
pub fn catalog_violations(document: &serde_json::Value) -> Result<Vec<String>, SchemaError> {
    let validator = catalog_validator()?;
    Ok(validator
        .iter_errors(document)
        .map(|e| format!("{} at {}", e, e.instance_path))
        .collect())
}
