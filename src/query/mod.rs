//! Google-style search-term queries over production-type names.
//!
//! A query divides its terms into three groups: terms that may match
//! (or-terms), terms that must match (and-terms, `+`) and terms that must
//! not match (not-terms, `-`). Matching is case-insensitive substring
//! containment, so `dairy` matches both "Dairy - milking" and
//! "Mixed dairy and goats".

pub mod cache;
pub mod parser;

pub use cache::QueryCache;

use parser::{next_term, Sigil};

/// A parsed search-term query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    or_terms: Vec<String>,
    and_terms: Vec<String>,
    not_terms: Vec<String>,
}

impl Query {
    /// Parse a pattern string (without its leading `$` marker) into term
    /// groups. Terms keep first-seen order within each group; an
    /// unparseable tail ends parsing without error.
    pub fn parse(pattern: &str) -> Self {
        let mut query = Query::default();
        let mut rest = pattern;
        while let Some((term, remaining)) = next_term(rest) {
            match term.sigil {
                Sigil::May => query.or_terms.push(term.text),
                Sigil::Must => query.and_terms.push(term.text),
                Sigil::MustNot => query.not_terms.push(term.text),
            }
            rest = remaining;
        }
        log::debug!(
            "parsed pattern {pattern:?}: or={:?} and={:?} not={:?}",
            query.or_terms,
            query.and_terms,
            query.not_terms
        );
        query
    }

    /// Returns the subset of `items` kept by the query, preserving input
    /// order and original casing. An item is kept when it contains no
    /// not-term, contains every and-term, and (if any or-terms exist)
    /// contains at least one or-term. A query with no terms keeps
    /// everything.
    pub fn matches<'a>(&self, items: &'a [String]) -> Vec<&'a str> {
        items
            .iter()
            .filter(|item| self.keeps(&item.to_lowercase()))
            .map(String::as_str)
            .collect()
    }

    fn keeps(&self, item_lower: &str) -> bool {
        if self.not_terms.iter().any(|t| item_lower.contains(t.as_str())) {
            return false;
        }
        if !self.and_terms.iter().all(|t| item_lower.contains(t.as_str())) {
            return false;
        }
        self.or_terms.is_empty() || self.or_terms.iter().any(|t| item_lower.contains(t.as_str()))
    }

    /// Render an English description of what the query matches. Diagnostic
    /// output only; matching never consults this.
    pub fn to_english(&self) -> String {
        let quoted = |terms: &[String]| -> Vec<String> {
            terms.iter().map(|t| format!("\"{t}\"")).collect()
        };

        let mut text = String::new();
        if !self.and_terms.is_empty() {
            text.push_str("containing ");
            text.push_str(&list_to_english(&quoted(&self.and_terms), "and"));
        }
        if !self.or_terms.is_empty() {
            if self.and_terms.is_empty() {
                text.push_str("containing one or more of ");
            } else {
                text.push_str(", plus one or more of ");
            }
            text.push_str(&list_to_english(&quoted(&self.or_terms), "or"));
        }
        if !self.not_terms.is_empty() {
            if self.and_terms.is_empty() && self.or_terms.is_empty() {
                text.push_str("not containing ");
            } else {
                text.push_str(", but not containing ");
            }
            text.push_str(&list_to_english(&quoted(&self.not_terms), "or"));
        }
        if self.and_terms.is_empty() && self.or_terms.is_empty() && self.not_terms.is_empty() {
            text.push_str("containing anything");
        }
        text
    }
}

/// Join a list with commas and a final connective:
/// `[A] -> "A"`, `[A,B] -> "A or B"`, `[A,B,C] -> "A, B or C"`.
fn list_to_english(items: &[String], connective: &str) -> String {
    let mut text = String::new();
    let n = items.len();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            if i == n - 1 {
                text.push(' ');
                text.push_str(connective);
                text.push(' ');
            } else {
                text.push_str(", ");
            }
        }
        text.push_str(item);
    }
    text
}
