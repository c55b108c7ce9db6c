//! Core types shared across the splitter, registries and catalogs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::splitter::SplitterError;

/// The declared data type a field's tokens must conform to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Integer,
    Boolean,
    Float,
    Date,
    DateAndTime,
    String,
    Widestring,
    Enumeration,
    MultiEnum,
}

impl TypeKind {
    /// Every recognized kind, in registry order.
    pub const ALL: [TypeKind; 9] = [
        TypeKind::Integer,
        TypeKind::Enumeration,
        TypeKind::Boolean,
        TypeKind::Float,
        TypeKind::Date,
        TypeKind::String,
        TypeKind::MultiEnum,
        TypeKind::Widestring,
        TypeKind::DateAndTime,
    ];

    /// Canonical upper-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Integer => "INTEGER",
            TypeKind::Boolean => "BOOLEAN",
            TypeKind::Float => "FLOAT",
            TypeKind::Date => "DATE",
            TypeKind::DateAndTime => "DATE_AND_TIME",
            TypeKind::String => "STRING",
            TypeKind::Widestring => "WIDESTRING",
            TypeKind::Enumeration => "ENUMERATION",
            TypeKind::MultiEnum => "MULTI_ENUM",
        }
    }

    /// True for kinds validated by enum membership instead of a format rule.
    pub fn is_enumerated(&self) -> bool {
        matches!(self, TypeKind::Enumeration | TypeKind::MultiEnum)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeKind {
    type Err = SplitterError;

    /// Case-insensitive: the name is upper-cased before lookup.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_uppercase();
        TypeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| SplitterError::InvalidType(s.to_string()))
    }
}

/// The canonical value of an enum entry: either text or a number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum EnumValue {
    Number(serde_json::Number),
    Text(String),
}

impl EnumValue {
    /// The string form used as the value→name lookup key.
    ///
    /// Numbers use the shortest round-trip digits laid out as JavaScript
    /// prints them: plain notation for magnitudes in `[1e-6, 1e21)`,
    /// exponent notation (`1e+21`, `1.5e-7`) outside it.
    pub fn key(&self) -> String {
        match self {
            EnumValue::Text(text) => text.clone(),
            EnumValue::Number(number) => match number.as_f64() {
                Some(f) => js_number_string(f),
                None => number.to_string(),
            },
        }
    }
}

fn js_number_string(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f == 0.0 {
        return "0".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let sign = if f < 0.0 { "-" } else { "" };

    // Shortest round-trip digits, e.g. "1.7001e4".
    let exp_form = format!("{:e}", f.abs());
    let (mantissa, exponent) = exp_form.split_once('e').unwrap_or((exp_form.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);

    let k = digits.len() as i32;
    let n = exponent + 1;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{}.{}", int, frac)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let e = n - 1;
        let e_sign = if e < 0 { '-' } else { '+' };
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", lead, e_sign, e.abs())
        } else {
            format!("{}.{}e{}{}", lead, rest, e_sign, e.abs())
        }
    };

    format!("{}{}", sign, body)
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl From<&str> for EnumValue {
    fn from(text: &str) -> Self {
        EnumValue::Text(text.to_string())
    }
}

impl From<String> for EnumValue {
    fn from(text: String) -> Self {
        EnumValue::Text(text)
    }
}

macro_rules! enum_value_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for EnumValue {
                fn from(n: $t) -> Self {
                    EnumValue::Number(n.into())
                }
            }
        )*
    };
}

enum_value_from_int!(i32, i64, u32, u64);

/// One allowed option of an enumerated field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnumEntry {
    /// Canonical name (e.g., "ADA, Idaho")
    pub name: String,

    /// Canonical value (e.g., 16001)
    pub value: EnumValue,
}

impl EnumEntry {
    pub fn new(name: impl Into<String>, value: impl Into<EnumValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Outcome of one `validate` call.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: usize,
    pub invalid: usize,
}

impl ValidationResult {
    /// Number of tokens classified.
    pub fn total(&self) -> usize {
        self.valid + self.invalid
    }

    pub fn is_all_valid(&self) -> bool {
        self.invalid == 0
    }
}
