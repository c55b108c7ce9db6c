//! The splitter: split a field value on delimiters and classify each token.

use thiserror::Error;

use crate::catalog::EnumCatalog;
use crate::delimiters::build_split_pattern;
use crate::enum_index::EnumIndex;
use crate::rules::{rule_for, Rule};
use crate::types::{EnumEntry, TypeKind, ValidationResult};

/// Errors raised while constructing a splitter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SplitterError {
    #[error("invalid type: {0}")]
    InvalidType(String),

    #[error("{0} type splitter must be initialized with enums array")]
    MissingEnums(TypeKind),
}

/// Validates delimited field values against one declared type.
///
/// Fully built on construction and never mutated afterwards, so a single
/// instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct Splitter {
    kind: TypeKind,
    rule: Rule,
    enums: Option<EnumIndex>,
}

impl Splitter {
    /// Create a splitter for `kind` (case-insensitive).
    ///
    /// Enumerated kinds require `enums`; other kinds ignore it.
    pub fn new(kind: &str, enums: Option<&[EnumEntry]>) -> Result<Self, SplitterError> {
        let kind: TypeKind = kind.parse()?;
        let rule = rule_for(kind);

        let enums = match rule {
            Rule::EnumMembership => {
                let entries = enums.ok_or(SplitterError::MissingEnums(kind))?;
                Some(EnumIndex::build(entries))
            }
            Rule::Pattern(_) | Rule::Any => None,
        };

        tracing::debug!(kind = %kind, "Splitter constructed");

        Ok(Self { kind, rule, enums })
    }

    /// Create a splitter from loosely typed enum definitions.
    ///
    /// For enumerated kinds, `enums` must be a JSON array of `{name, value}`
    /// objects; anything else is rejected as missing enums.
    pub fn from_json(
        kind: &str,
        enums: Option<&serde_json::Value>,
    ) -> Result<Self, SplitterError> {
        let parsed: TypeKind = kind.parse()?;
        if !parsed.is_enumerated() {
            return Self::new(kind, None);
        }

        let entries = match enums {
            Some(value @ serde_json::Value::Array(_)) => {
                serde_json::from_value::<Vec<EnumEntry>>(value.clone()).map_err(|e| {
                    tracing::debug!(error = %e, "Enum definitions are not name/value objects");
                    SplitterError::MissingEnums(parsed)
                })?
            }
            _ => return Err(SplitterError::MissingEnums(parsed)),
        };

        Self::new(kind, Some(entries.as_slice()))
    }

    /// Create a splitter whose enum definitions come from a catalog.
    pub fn with_catalog(kind: &str, catalog: &EnumCatalog) -> Result<Self, SplitterError> {
        Self::new(kind, Some(catalog.enums.as_slice()))
    }

    /// The normalized type kind.
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// True when tokens are checked by enum membership.
    pub fn is_enum(&self) -> bool {
        self.enums.is_some()
    }

    /// The enum lookup, for enumerated splitters.
    pub fn enum_index(&self) -> Option<&EnumIndex> {
        self.enums.as_ref()
    }

    /// Classify a single token.
    pub fn is_valid_token(&self, token: &str) -> bool {
        match self.rule.matches(token) {
            Some(matched) => matched,
            None => self
                .enums
                .as_ref()
                .is_some_and(|index| index.contains(token)),
        }
    }

    /// Split `input` on the named delimiters.
    pub fn tokens<'h, S: AsRef<str>>(&self, input: &'h str, delimiters: &[S]) -> Vec<&'h str> {
        let pattern = build_split_pattern(delimiters);
        if pattern.is_empty() {
            tracing::trace!("No recognized delimiter, input is a single token");
        } else {
            tracing::trace!(pattern = pattern.as_str(), "Splitting input");
        }
        pattern.split(input)
    }

    /// Split `input` and count valid and invalid tokens.
    ///
    /// Unrecognized delimiter names are ignored; with none left the whole
    /// input is one token.
    pub fn validate<S: AsRef<str>>(&self, input: &str, delimiters: &[S]) -> ValidationResult {
        self.tokens(input, delimiters)
            .into_iter()
            .fold(ValidationResult::default(), |mut result, token| {
                if self.is_valid_token(token) {
                    result.valid += 1;
                } else {
                    result.invalid += 1;
                }
                result
            })
    }

    /// The tokens `validate` would count as invalid, in input order.
    pub fn invalid_tokens<'h, S: AsRef<str>>(
        &self,
        input: &'h str,
        delimiters: &[S],
    ) -> Vec<&'h str> {
        self.tokens(input, delimiters)
            .into_iter()
            .filter(|token| !self.is_valid_token(token))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ALL_DELIMITERS: [&str; 5] = ["COMMA", "SEMICOLON", "SPACE", "TABULATOR", "NEWLINE"];

    fn counties() -> Vec<EnumEntry> {
        vec![
            EnumEntry::new("ACCOMACK, Virginia", 51001),
            EnumEntry::new("ADA, Idaho", 16001),
            EnumEntry::new("ADAMS, Illinois", 17001),
        ]
    }

    #[test]
    fn test_invalid_type() {
        assert_eq!(
            Splitter::new("dog", None).unwrap_err(),
            SplitterError::InvalidType("dog".to_string())
        );
    }

    #[test]
    fn test_enumeration_requires_enums() {
        assert_eq!(
            Splitter::new("enumeration", None).unwrap_err(),
            SplitterError::MissingEnums(TypeKind::Enumeration)
        );
        assert_eq!(
            Splitter::new("multi_enum", None).unwrap_err(),
            SplitterError::MissingEnums(TypeKind::MultiEnum)
        );
    }

    #[test]
    fn test_non_enum_ignores_enums() {
        let splitter = Splitter::new("integer", Some(counties().as_slice())).unwrap();
        assert!(!splitter.is_enum());
        assert!(splitter.enum_index().is_none());
        assert_eq!(splitter.kind(), TypeKind::Integer);
    }

    #[test]
    fn test_from_json_rejects_non_sequences() {
        let not_array = serde_json::json!({"name": "ADA, Idaho", "value": 16001});
        assert_eq!(
            Splitter::from_json("ENUMERATION", Some(&not_array)).unwrap_err(),
            SplitterError::MissingEnums(TypeKind::Enumeration)
        );

        let bad_elements = serde_json::json!(["ADA, Idaho"]);
        assert_eq!(
            Splitter::from_json("ENUMERATION", Some(&bad_elements)).unwrap_err(),
            SplitterError::MissingEnums(TypeKind::Enumeration)
        );

        assert!(Splitter::from_json("ENUMERATION", None).is_err());
        assert!(Splitter::from_json("boolean", Some(&not_array)).is_ok());
    }

    #[test]
    fn test_from_json_builds_index() {
        let enums = serde_json::json!([
            {"name": "ADA, Idaho", "value": 16001},
            {"name": "OPEN", "value": "O"}
        ]);
        let splitter = Splitter::from_json("Enumeration", Some(&enums)).unwrap();
        let index = splitter.enum_index().unwrap();
        assert_eq!(index.name_count(), 2);
        assert_eq!(index.value_count(), 2);
    }

    #[test]
    fn test_validate_enum() {
        let splitter = Splitter::new("enumeration", Some(counties().as_slice())).unwrap();
        let result = splitter.validate("ACCOMACK, Virginia\nADA, Idaho\n17001\ndog", &["NEWLINE"]);
        assert_eq!(result, ValidationResult { valid: 3, invalid: 1 });
    }

    #[test]
    fn test_validate_integer_all_delimiters() {
        let splitter = Splitter::new("integer", None).unwrap();
        let result = splitter.validate("1,2;3 4\t5\r\n6", &ALL_DELIMITERS);
        assert_eq!(result, ValidationResult { valid: 6, invalid: 0 });
    }

    #[test]
    fn test_validate_without_delimiters_is_one_token() {
        let splitter = Splitter::new("integer", None).unwrap();
        let none: [&str; 0] = [];
        assert_eq!(
            splitter.validate("12", &none),
            ValidationResult { valid: 1, invalid: 0 }
        );
        assert_eq!(
            splitter.validate("1,2", &none),
            ValidationResult { valid: 0, invalid: 1 }
        );
        assert_eq!(
            splitter.validate("1,2", &["PIPE"]),
            ValidationResult { valid: 0, invalid: 1 }
        );
    }

    #[test]
    fn test_empty_tokens_are_classified() {
        let integer = Splitter::new("integer", None).unwrap();
        assert_eq!(
            integer.validate("1,,2,", &["COMMA"]),
            ValidationResult { valid: 2, invalid: 2 }
        );

        let string = Splitter::new("string", None).unwrap();
        assert_eq!(
            string.validate("", &["COMMA"]),
            ValidationResult { valid: 1, invalid: 0 }
        );
    }

    #[test]
    fn test_invalid_tokens() {
        let splitter = Splitter::new("boolean", None).unwrap();
        assert_eq!(
            splitter.invalid_tokens("true,yes;0,maybe", &["COMMA", "SEMICOLON"]),
            vec!["yes", "maybe"]
        );
    }

    #[test]
    fn test_validate_with_huge_repeated_delimiter_list() {
        let splitter = Splitter::new("integer", None).unwrap();
        let names = vec!["NEWLINE"; 3_000_000];
        assert_eq!(
            splitter.validate("1\n2", &names),
            ValidationResult { valid: 2, invalid: 0 }
        );
    }

    #[test]
    fn test_enum_splitter_dispatches_through_index() {
        let splitter = Splitter::new("multi_enum", Some(counties().as_slice())).unwrap();
        assert!(splitter.is_valid_token("ADA, Idaho"));
        assert!(splitter.is_valid_token("51001"));
        assert!(!splitter.is_valid_token("1"));

        let string = Splitter::new("widestring", None).unwrap();
        assert!(string.is_valid_token(""));
    }

    #[test]
    fn test_splitter_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Splitter>();
    }

    proptest! {
        #[test]
        fn prop_token_count_is_matches_plus_one(
            tokens in prop::collection::vec("[a-z0-9]{1,8}", 1..20),
            sep in prop::sample::select(vec![",", ";", "\t", "\n"]),
        ) {
            let splitter = Splitter::new("string", None).unwrap();
            let input = tokens.join(sep);
            let result = splitter.validate(&input, &ALL_DELIMITERS);
            prop_assert_eq!(result.total(), tokens.len());
            prop_assert_eq!(result.valid, tokens.len());
        }

        #[test]
        fn prop_validate_is_idempotent(input in "[0-9a-z,; \t\r\n-]{0,40}") {
            let splitter = Splitter::new("integer", None).unwrap();
            let first = splitter.validate(&input, &ALL_DELIMITERS);
            let _ = splitter.validate("unrelated,call", &["COMMA"]);
            let second = splitter.validate(&input, &ALL_DELIMITERS);
            prop_assert_eq!(first, second);
        }
    }
}
