//! Free-text course search over the catalog listing

use super::{Catalog, CatalogEntry};

/// Results returned when the caller does not ask for a limit
pub const DEFAULT_SEARCH_LIMIT: usize = 40;

const MIN_TERM_LEN: usize = 2;

/// Find courses whose `"{catNo} {title}"` contains `term`, case-insensitively
///
/// Terms shorter than two characters match nothing. Results follow the course list
/// order and stop at `limit`.
pub fn search_catalog<'a>(
    catalog: &'a Catalog,
    term: &str,
    limit: usize,
) -> Vec<&'a CatalogEntry> {
    let term = term.trim().to_lowercase();
    if term.chars().count() < MIN_TERM_LEN {
        return Vec::new();
    }

    catalog
        .course_list()
        .into_iter()
        .filter(|entry| {
            format!("{} {}", entry.cat_no, entry.course_title)
                .to_lowercase()
                .contains(&term)
        })
        .take(limit)
        .collect()
}
