//! Course catalog built from raw class offerings
//!
//! The catalog is derived state: it is built once from a complete dataset and never
//! patched. A refreshed dataset produces a new [`Catalog`], which [`CatalogStore`]
//! publishes in one step.

use crate::color::Palette;
use crate::parser::{self, utils};
use log::{debug, info, warn};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};

mod catalog_import;
mod catalog_index;
mod catalog_search;
mod catalog_types;
mod catalog_validation;

pub use catalog_import::*;
pub use catalog_index::*;
pub use catalog_search::*;
pub use catalog_types::*;
pub use catalog_validation::*;

/// Immutable map of normalized catalog number to entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: BTreeMap<String, CatalogEntry>,
    course_order: Vec<String>,
}

impl Catalog {
    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries.get(key)
    }

    /// Look up by display catalog number, normalizing it first
    pub fn get_by_cat_no(&self, cat_no: &str) -> Option<&CatalogEntry> {
        self.entries.get(&utils::normalize_cat_no(cat_no))
    }

    /// Entries in iteration (key) order
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    /// Entries ordered by display catalog number for listing
    pub fn course_list(&self) -> Vec<&CatalogEntry> {
        self.course_order
            .iter()
            .filter_map(|key| self.entries.get(key))
            .collect()
    }

    /// Every section of every entry
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.entries
            .values()
            .flat_map(|entry| entry.sections.iter())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Case-insensitive ordering with an ordinal tiebreak, close to a locale collation
/// for the ASCII catalog numbers the registrar publishes
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = a.to_lowercase().cmp(&b.to_lowercase());
    folded.then_with(|| a.cmp(b))
}

/// Builds catalogs with a given color palette
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    palette: Palette,
}

impl CatalogBuilder {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Derive a section from one raw row
    pub fn build_section(&self, raw: &RawSection, id: String) -> Section {
        let cat_no = utils::normalize_text(&raw.cat_no);
        let course_title = utils::normalize_text(&raw.course_title);
        let time = utils::normalize_text(&raw.time);
        let normalized_cat_no = utils::normalize_cat_no(&cat_no);

        let parsed = parser::parse_time_string(&time);
        let meetings = retain_valid_meetings(&cat_no, parsed.meetings);
        let (no_time, time_reason) = if parsed.no_time {
            (true, parsed.reason)
        } else if meetings.is_empty() {
            (true, Some(parser::NoTimeReason::UnparsedTime))
        } else {
            (false, None)
        };
        let meeting_blocks = meetings.iter().flat_map(|m| m.blocks()).collect();

        Section {
            id,
            color_class: self.palette.color_for(&normalized_cat_no).to_string(),
            search_text: format!("{} {}", cat_no, course_title).to_lowercase(),
            section: utils::normalize_text(&raw.section),
            instructor: utils::normalize_text(&raw.instructor),
            room: utils::normalize_text(&raw.room),
            units: utils::normalize_text(&raw.units),
            remarks: utils::normalize_text(&raw.remarks),
            dept_code: utils::normalize_text(&raw.dept_code),
            cat_no,
            course_title,
            time,
            meetings,
            meeting_blocks,
            no_time,
            time_reason,
            normalized_cat_no,
        }
    }

    /// Group raw rows into a catalog
    pub fn build<'a, I>(&self, rows: I) -> Catalog
    where
        I: IntoIterator<Item = &'a RawSection>,
    {
        let mut entries: BTreeMap<String, CatalogEntry> = BTreeMap::new();
        let mut used_ids: HashSet<String> = HashSet::new();
        let mut skipped = 0usize;

        for (row, raw) in rows.into_iter().enumerate() {
            let normalized = utils::normalize_cat_no(&raw.cat_no);
            if normalized.is_empty() {
                skipped += 1;
                continue;
            }

            let id = assign_section_id(raw.id.as_deref(), &normalized, row, &mut used_ids);
            let section = self.build_section(raw, id);
            if section.no_time {
                debug!(
                    "Section {} {} has no time: {}",
                    section.cat_no,
                    section.section,
                    section.time_reason.map(|r| r.as_str()).unwrap_or("")
                );
            }

            let entry = entries.entry(normalized.clone()).or_insert_with(|| CatalogEntry {
                key: normalized,
                cat_no: section.cat_no.clone(),
                course_title: section.course_title.clone(),
                sections: Vec::new(),
            });
            if entry.course_title.is_empty() && !section.course_title.is_empty() {
                entry.course_title = section.course_title.clone();
            }
            entry.sections.push(section);
        }

        if skipped > 0 {
            warn!("Skipped {} rows without a catalog number", skipped);
        }

        let mut course_order: Vec<&CatalogEntry> = entries.values().collect();
        course_order.sort_by(|a, b| locale_compare(&a.cat_no, &b.cat_no));
        let course_order = course_order
            .into_iter()
            .map(|entry| entry.key.clone())
            .collect();

        info!(
            "Built catalog with {} courses and {} sections",
            entries.len(),
            used_ids.len()
        );
        Catalog {
            entries,
            course_order,
        }
    }
}

fn assign_section_id(
    source_id: Option<&str>,
    normalized: &str,
    row: usize,
    used_ids: &mut HashSet<String>,
) -> String {
    if let Some(id) = source_id.map(str::trim).filter(|id| !id.is_empty()) {
        if used_ids.insert(id.to_string()) {
            return id.to_string();
        }
        warn!(
            "Duplicate section id '{}' at row {}, assigning a new one",
            id, row
        );
    }

    let mut candidate = format!("{}-{}", normalized, row);
    let mut suffix = 1;
    while !used_ids.insert(candidate.clone()) {
        candidate = format!("{}-{}-{}", normalized, row, suffix);
        suffix += 1;
    }
    candidate
}

/// Build a catalog with the default palette
pub fn build_catalog(rows: &[RawSection]) -> Catalog {
    CatalogBuilder::default().build(rows)
}

/// Holds the current catalog; a rebuild replaces it as a whole
#[derive(Debug, Default)]
pub struct CatalogStore {
    current: RwLock<Arc<Catalog>>,
}

impl CatalogStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// Snapshot of the catalog in use; stays valid across later replacements
    pub fn current(&self) -> Arc<Catalog> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let next = Arc::new(catalog);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::clone(&next);
        next
    }

    /// Build a catalog from a fresh dataset and publish it
    pub fn rebuild(&self, rows: &[RawSection], builder: &CatalogBuilder) -> Arc<Catalog> {
        self.replace(builder.build(rows))
    }
}
