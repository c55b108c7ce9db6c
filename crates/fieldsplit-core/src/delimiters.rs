//! Delimiter names and split-pattern construction.

use regex::{Regex, RegexBuilder};

/// A recognized delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    Comma,
    Semicolon,
    Space,
    Tabulator,
    Newline,
}

impl Delimiter {
    pub const ALL: [Delimiter; 5] = [
        Delimiter::Comma,
        Delimiter::Semicolon,
        Delimiter::Space,
        Delimiter::Tabulator,
        Delimiter::Newline,
    ];

    /// Look up a delimiter by its exact (upper-case) name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Delimiter::Comma => "COMMA",
            Delimiter::Semicolon => "SEMICOLON",
            Delimiter::Space => "SPACE",
            Delimiter::Tabulator => "TABULATOR",
            Delimiter::Newline => "NEWLINE",
        }
    }

    /// Regex fragment matching one occurrence of this delimiter.
    pub fn fragment(&self) -> &'static str {
        match self {
            Delimiter::Comma => ",",
            Delimiter::Semicolon => ";",
            Delimiter::Space => r"\x20+",
            Delimiter::Tabulator => r"\t",
            Delimiter::Newline => r"\r?\n+",
        }
    }
}

/// Combined separator pattern for one delimiter set.
///
/// An empty set has no pattern; splitting then yields the whole input as a
/// single token.
#[derive(Debug, Clone)]
pub struct SplitPattern {
    source: String,
    regex: Option<Regex>,
}

impl SplitPattern {
    /// The alternation the pattern was built from (empty when no delimiter
    /// was recognized).
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_empty(&self) -> bool {
        self.regex.is_none()
    }

    /// Split `input` on every match, keeping empty leading, trailing and
    /// in-between segments.
    pub fn split<'h>(&self, input: &'h str) -> Vec<&'h str> {
        match &self.regex {
            Some(regex) => regex.split(input).collect(),
            None => vec![input],
        }
    }
}

/// Build one alternation pattern from delimiter names, in the given order.
///
/// Names that are not recognized are skipped. Repeated names keep only their
/// first position, so the pattern never holds more than five alternatives.
pub fn build_split_pattern<S: AsRef<str>>(names: &[S]) -> SplitPattern {
    let mut delimiters: Vec<Delimiter> = Vec::with_capacity(Delimiter::ALL.len());
    for name in names {
        let name = name.as_ref();
        match Delimiter::from_name(name) {
            Some(delimiter) if !delimiters.contains(&delimiter) => delimiters.push(delimiter),
            Some(_) => {}
            None => {
                tracing::debug!(delimiter = name, "Skipping unrecognized delimiter");
            }
        }
    }

    let fragments: Vec<&'static str> = delimiters.iter().map(|d| d.fragment()).collect();

    if fragments.is_empty() {
        return SplitPattern {
            source: String::new(),
            regex: None,
        };
    }

    let source = fragments.join("|");
    let regex = RegexBuilder::new(&source)
        .multi_line(true)
        .build()
        .expect("delimiter fragments form a valid regex");

    SplitPattern {
        source,
        regex: Some(regex),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_NAMES: [&str; 5] = ["COMMA", "SEMICOLON", "SPACE", "TABULATOR", "NEWLINE"];

    #[test]
    fn test_names_are_case_sensitive() {
        assert_eq!(Delimiter::from_name("COMMA"), Some(Delimiter::Comma));
        assert_eq!(Delimiter::from_name("comma"), None);
        assert_eq!(Delimiter::from_name("PIPE"), None);
    }

    #[test]
    fn test_pattern_joins_in_order() {
        let pattern = build_split_pattern(&["NEWLINE", "COMMA"]);
        assert_eq!(pattern.as_str(), r"\r?\n+|,");
    }

    #[test]
    fn test_pattern_skips_unrecognized() {
        let pattern = build_split_pattern(&["PIPE", "COMMA", "comma", "TABULATOR"]);
        assert_eq!(pattern.as_str(), r",|\t");
    }

    #[test]
    fn test_repeated_names_collapse() {
        let pattern = build_split_pattern(&["COMMA", "NEWLINE", "COMMA", "NEWLINE"]);
        assert_eq!(pattern.as_str(), r",|\r?\n+");
    }

    #[test]
    fn test_huge_repeated_delimiter_list_stays_small() {
        let names = vec!["NEWLINE"; 3_000_000];
        let pattern = build_split_pattern(&names);
        assert_eq!(pattern.as_str(), r"\r?\n+");
        assert_eq!(pattern.split("1\n2"), vec!["1", "2"]);
    }

    #[test]
    fn test_split_every_delimiter() {
        let pattern = build_split_pattern(&ALL_NAMES);
        let parts = pattern.split("this,should;provide every\ttype\nof\r\ndelimiter");
        assert_eq!(
            parts,
            vec!["this", "should", "provide", "every", "type", "of", "delimiter"]
        );
    }

    #[test]
    fn test_space_and_newline_runs_collapse() {
        let pattern = build_split_pattern(&["SPACE", "NEWLINE"]);
        assert_eq!(pattern.split("a   b\n\n\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_boundary_and_consecutive_delimiters_yield_empty_tokens() {
        let pattern = build_split_pattern(&["COMMA"]);
        assert_eq!(pattern.split(",a,,b,"), vec!["", "a", "", "b", ""]);
    }

    #[test]
    fn test_empty_input_is_one_empty_token() {
        let pattern = build_split_pattern(&["COMMA"]);
        assert_eq!(pattern.split(""), vec![""]);
    }

    #[test]
    fn test_no_delimiters_keeps_whole_input() {
        let empty: [&str; 0] = [];
        let pattern = build_split_pattern(&empty);
        assert!(pattern.is_empty());
        assert_eq!(pattern.split("a,b c"), vec!["a,b c"]);

        let unknown = build_split_pattern(&["PIPE", "comma"]);
        assert!(unknown.is_empty());
        assert_eq!(unknown.split("a,b"), vec!["a,b"]);
    }
}
