//! Format rules per type kind.
//!
//! Every non-enumerated kind maps to exactly one immutable rule. Patterns are
//! compiled once on first use and shared by all splitters.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::TypeKind;

lazy_static! {
    /// Optional minus, no leading zero, no plain "0".
    pub static ref INTEGER_PATTERN: Regex = Regex::new(
        r"^-?[1-9][0-9]*$"
    ).unwrap();

    pub static ref BOOLEAN_PATTERN: Regex = Regex::new(
        r"^(?:true|false|0|1)$"
    ).unwrap();

    /// Integer mantissa, then any single non-line-terminator character
    /// followed by digits. The separator is deliberately not restricted to `.`.
    pub static ref FLOAT_PATTERN: Regex = Regex::new(
        r"^-?[1-9][0-9]*(?:[^\n\r\x{2028}\x{2029}][0-9]*)?$"
    ).unwrap();

    /// Separators are matched independently, so `1999-12.25` passes.
    pub static ref DATE_PATTERN: Regex = Regex::new(
        r"^[12][0-9]{3}[.-][0-9]{2}[.-][0-9]{2}\.?$"
    ).unwrap();

    pub static ref DATE_AND_TIME_PATTERN: Regex = Regex::new(
        r"^[12][0-9]{3}[.-][0-9]{2}[.-][0-9]{2}\.? (?:[01][0-9]|2[0-3]):[0-5][0-9](?::[0-5][0-9])?$"
    ).unwrap();
}

/// How tokens of a given kind are classified.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Token must match the whole pattern.
    Pattern(&'static Regex),

    /// Every token is valid, including the empty one.
    Any,

    /// Classification is delegated to enum membership.
    EnumMembership,
}

impl Rule {
    /// Test a token against a format rule.
    ///
    /// Returns `None` for [`Rule::EnumMembership`], which cannot be decided
    /// without an enum index.
    pub fn matches(&self, token: &str) -> Option<bool> {
        match self {
            Rule::Pattern(pattern) => Some(pattern.is_match(token)),
            Rule::Any => Some(true),
            Rule::EnumMembership => None,
        }
    }
}

/// Look up the rule for a kind.
pub fn rule_for(kind: TypeKind) -> Rule {
    match kind {
        TypeKind::Integer => Rule::Pattern(&INTEGER_PATTERN),
        TypeKind::Boolean => Rule::Pattern(&BOOLEAN_PATTERN),
        TypeKind::Float => Rule::Pattern(&FLOAT_PATTERN),
        TypeKind::Date => Rule::Pattern(&DATE_PATTERN),
        TypeKind::DateAndTime => Rule::Pattern(&DATE_AND_TIME_PATTERN),
        TypeKind::String | TypeKind::Widestring => Rule::Any,
        TypeKind::Enumeration | TypeKind::MultiEnum => Rule::EnumMembership,
    }
}
