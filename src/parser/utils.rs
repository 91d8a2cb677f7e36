//! Text normalization helpers shared by the parser, the catalog and the matcher
//!
//! Every function here is pure: the same input always produces the same output,
//! which is what lets normalized catalog numbers act as stable map keys.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Trim a raw field, treating a missing value as empty
pub fn normalize_text(value: &str) -> String {
    value.trim().to_string()
}

/// Collapse every whitespace run to a single space and trim the ends
pub fn collapse_whitespace(value: &str) -> String {
    WHITESPACE_RE.replace_all(value.trim(), " ").into_owned()
}

/// Normalized catalog number used as the catalog key: trimmed, single-spaced, uppercased
pub fn normalize_cat_no(value: &str) -> String {
    collapse_whitespace(value).to_uppercase()
}

/// Uppercased with every whitespace character removed ("csci 20 " -> "CSCI20")
pub fn compact_text(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Normalization used by saved-schedule keys: drops `()` artifacts before normalizing
pub fn normalize_legacy_value(value: &str) -> String {
    normalize_cat_no(&value.replace("()", ""))
}

/// Split a display catalog number into its department and number tokens
///
/// "chem  10.01" -> ("CHEM", "10.01"). Missing tokens come back empty.
pub fn split_cat_no(cat_no: &str) -> (String, String) {
    let mut parts = cat_no.split_whitespace();
    let dept = parts.next().unwrap_or("").to_uppercase();
    let num = parts.next().unwrap_or("").to_string();
    (dept, num)
}
