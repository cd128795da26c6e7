// LogSift - core/search.rs
//
// Search expression parsing and line matching.
// Terms are OR-combined; matching is case-insensitive substring containment.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::util::constants::SEARCH_TERM_DELIMITERS;
use crate::util::error::ScanError;

/// A parsed, case-folded search expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchExpression {
    raw: String,
    terms: Vec<String>,
}

impl SearchExpression {
    /// Parse raw user input.
    ///
    /// Input containing `,` or `;` is split into trimmed terms; otherwise the
    /// whole trimmed input is one term. Blank terms are discarded, and an
    /// expression left with no terms is rejected.
    pub fn parse(raw: &str) -> Result<Self, ScanError> {
        let folded = raw.trim().to_lowercase();

        let terms: Vec<String> = if folded.contains(SEARCH_TERM_DELIMITERS) {
            folded
                .split(SEARCH_TERM_DELIMITERS)
                .map(str::trim)
                // An empty term would match every line; "E1," means just E1.
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        } else if folded.is_empty() {
            Vec::new()
        } else {
            vec![folded]
        };

        if terms.is_empty() {
            return Err(ScanError::EmptySearch);
        }

        Ok(Self {
            raw: raw.trim().to_string(),
            terms,
        })
    }

    /// The trimmed input as the operator typed it.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Case-folded terms, in input order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// True if `line` contains any term, ignoring case.
    pub fn matches(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        self.matches_folded(&lower)
    }

    /// As `matches`, for a line that is already lower-cased.
    pub fn matches_folded(&self, folded_line: &str) -> bool {
        self.terms.iter().any(|t| folded_line.contains(t.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_term_case_insensitive() {
        let expr = SearchExpression::parse("  TimeOut ").unwrap();
        assert_eq!(expr.terms(), ["timeout"]);
        assert!(expr.matches("Connection TIMEOUT after 30s"));
        assert!(!expr.matches("Connection established"));
    }

    #[test]
    fn test_comma_terms_are_or_combined() {
        let expr = SearchExpression::parse("ERR-1, ERR-2").unwrap();
        assert!(expr.matches("saw err-2 twice"));
        assert!(expr.matches("ERR-1 at boot"));
        assert!(!expr.matches("err-3 only"));
    }

    #[test]
    fn test_semicolon_and_mixed_delimiters() {
        let expr = SearchExpression::parse("alarm;fault , halt").unwrap();
        assert_eq!(expr.terms(), ["alarm", "fault", "halt"]);
        assert!(expr.matches("Motor HALT requested"));
    }

    #[test]
    fn test_whitespace_kept_inside_single_term() {
        let expr = SearchExpression::parse("disk full").unwrap();
        assert!(expr.matches("ERROR: Disk Full on /var"));
        assert!(!expr.matches("disk is full"));
    }

    #[test]
    fn test_blank_terms_discarded() {
        let expr = SearchExpression::parse("E1,,  ;").unwrap();
        assert_eq!(expr.terms(), ["e1"]);
        assert!(!expr.matches("nothing relevant"));
    }

    #[test]
    fn test_empty_expression_rejected() {
        assert!(matches!(
            SearchExpression::parse("   "),
            Err(ScanError::EmptySearch)
        ));
        assert!(matches!(
            SearchExpression::parse(" , ; "),
            Err(ScanError::EmptySearch)
        ));
    }
}
