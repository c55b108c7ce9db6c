//! Enum catalogs.
//!
//! A catalog is a named list of enum entries stored as YAML or JSON. Catalog
//! documents are checked against an embedded JSON Schema before use.

mod parser;
mod schema;

pub use parser::{CatalogError, EnumCatalog};
pub use schema::{catalog_violations, SchemaError};
