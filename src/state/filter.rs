//! Option filtering (pure).
//!
//! Match rule: an option is kept iff its label, lowercased and trimmed,
//! contains the query, lowercased and trimmed, as an unanchored substring.

use crate::model::{OptionSet, SelectOption};

/// Normalize text for matching: lowercase, then trim surrounding whitespace.
pub fn normalize(text: &str) -> String {
    text.to_lowercase().trim().to_string()
}

/// Check a single option against an already-normalized query.
pub fn matches_normalized(option: &SelectOption, normalized_query: &str) -> bool {
    normalize(option.label()).contains(normalized_query)
}

/// Filter the full option set by query, preserving source order.
///
/// Single linear scan; the result is always a subset of `options`.
pub fn filter_options(options: &OptionSet, query: &str) -> OptionSet {
    let needle = normalize(query);
    options
        .iter()
        .filter(|option| matches_normalized(option, &needle))
        .cloned()
        .collect()
}
