//! Name/value lookup for enumerated fields.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

use crate::types::EnumEntry;

lazy_static! {
    /// Decimal literals with optional sign, fraction and exponent, signed
    /// `Infinity`, and unsigned hex/octal/binary integers.
    static ref NUMERIC_PATTERN: Regex = Regex::new(
        r"^(?:[+-]?(?:Infinity|(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)|0[xX][0-9a-fA-F]+|0[oO][0-7]+|0[bB][01]+)$"
    ).unwrap();
}

/// Whitespace stripped before the numeric test: Unicode `White_Space`
/// without NEL, plus the byte-order mark.
fn is_trimmable(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Whether a token reads as a number.
///
/// Surrounding whitespace is ignored. Empty and whitespace-only strings are
/// not numeric.
pub fn is_numeric(token: &str) -> bool {
    let trimmed = token.trim_matches(is_trimmable);
    !trimmed.is_empty() && NUMERIC_PATTERN.is_match(trimmed)
}

/// Dual lookup built once from an ordered list of enum entries.
#[derive(Debug, Clone, Default)]
pub struct EnumIndex {
    by_name: HashMap<String, String>,
    by_value: HashMap<String, String>,
}

impl EnumIndex {
    /// Build both maps in one pass. Later entries overwrite earlier ones
    /// sharing a name or value.
    pub fn build(entries: &[EnumEntry]) -> Self {
        let mut by_name = HashMap::with_capacity(entries.len());
        let mut by_value = HashMap::with_capacity(entries.len());

        for entry in entries {
            let value = entry.value.key();
            if by_name
                .insert(entry.name.clone(), value.clone())
                .is_some()
            {
                tracing::warn!(name = %entry.name, "Duplicate enum name, last entry wins");
            }
            if by_value.insert(value.clone(), entry.name.clone()).is_some() {
                tracing::warn!(value = %value, "Duplicate enum value, last entry wins");
            }
        }

        Self { by_name, by_value }
    }

    /// Number of entries in the name→value map.
    pub fn name_count(&self) -> usize {
        self.by_name.len()
    }

    /// Number of entries in the value→name map.
    pub fn value_count(&self) -> usize {
        self.by_value.len()
    }

    /// Membership test: numeric-looking tokens probe the values, everything
    /// else probes the names.
    pub fn contains(&self, token: &str) -> bool {
        if is_numeric(token) {
            self.by_value.contains_key(token)
        } else {
            self.by_name.contains_key(token)
        }
    }
}
