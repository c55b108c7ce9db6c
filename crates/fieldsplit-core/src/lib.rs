//! # fieldsplit-core
//!
//! Split a raw delimited field value and validate every token against a
//! declared data type.
//!
//! ## Key Guarantees
//!
//! 1. **Construction-time errors only**: an unknown type or a missing enum
//!    list is rejected when the [`Splitter`] is built; `validate` never fails
//! 2. **Deterministic**: the result depends only on the input and the
//!    delimiter names
//! 3. **Shareable**: a built splitter is immutable and `Send + Sync`
//!
//! ## Example
//!
//! ```rust
//! use fieldsplit_core::{EnumEntry, Splitter, ValidationResult};
//!
//! let splitter = Splitter::new("integer", None)?;
//! let result = splitter.validate("1,2;3 4\t5\r\n6", &["COMMA", "SEMICOLON", "SPACE", "TABULATOR", "NEWLINE"]);
//! assert_eq!(result, ValidationResult { valid: 6, invalid: 0 });
//!
//! let enums = vec![EnumEntry::new("ADA, Idaho", 16001)];
//! let splitter = Splitter::new("enumeration", Some(enums.as_slice()))?;
//! let result = splitter.validate("ADA, Idaho\n16001\ndog", &["NEWLINE"]);
//! assert_eq!(result, ValidationResult { valid: 2, invalid: 1 });
//! # Ok::<(), fieldsplit_core::SplitterError>(())
//! ```

pub mod catalog;
pub mod delimiters;
pub mod enum_index;
pub mod rules;
pub mod splitter;
pub mod types;

// Re-export main types at crate root
pub use catalog::{CatalogError, EnumCatalog, SchemaError};
pub use delimiters::{build_split_pattern, Delimiter, SplitPattern};
pub use enum_index::{is_numeric, EnumIndex};
pub use rules::{rule_for, Rule};
pub use splitter::{Splitter, SplitterError};
pub use types::{EnumEntry, EnumValue, TypeKind, ValidationResult};

/// Build a splitter and validate one input in a single call.
///
/// Prefer constructing a [`Splitter`] once when validating many values of
/// the same field.
pub fn validate_field<S: AsRef<str>>(
    kind: &str,
    enums: Option<&[EnumEntry]>,
    input: &str,
    delimiters: &[S],
) -> Result<ValidationResult, SplitterError> {
    let splitter = Splitter::new(kind, enums)?;
    Ok(splitter.validate(input, delimiters))
}
