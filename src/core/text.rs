//! Case-insensitive literal text matching.
//!
//! Search terms are user input and must never be interpreted as a pattern
//! language, so everything here works on plain substring containment after
//! Unicode lowercasing.

/// Check whether `haystack` contains `needle` ignoring case
///
/// # Arguments
/// * `haystack` - The candidate field value
/// * `needle` - The search term, treated as literal text
#[inline]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Check whether two strings are equal ignoring case
///
/// Exact equality after case normalization, as opposed to containment.
#[inline]
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
