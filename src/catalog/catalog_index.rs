//! Section lookup for restoring saved schedules
//!
//! Saved schedules reference sections by id, but ids from older datasets may no
//! longer exist after a refresh. Resolution falls back to the section's natural
//! keys: catalog number + section + time, then catalog number + section.

use super::{Catalog, Section};
use crate::parser::utils::normalize_legacy_value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A section reference as stored by a caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavedSectionRef {
    pub id: Option<String>,
    pub cat_no: String,
    pub section: String,
    pub time: String,
}

impl From<&Section> for SavedSectionRef {
    fn from(section: &Section) -> Self {
        Self {
            id: Some(section.id.clone()),
            cat_no: section.cat_no.clone(),
            section: section.section.clone(),
            time: section.time.clone(),
        }
    }
}

pub fn legacy_key(cat_no: &str, section: &str, time: &str) -> String {
    format!(
        "{}|{}|{}",
        normalize_legacy_value(cat_no),
        normalize_legacy_value(section),
        normalize_legacy_value(time)
    )
}

pub fn cat_section_key(cat_no: &str, section: &str) -> String {
    format!(
        "{}|{}",
        normalize_legacy_value(cat_no),
        normalize_legacy_value(section)
    )
}

/// Lookup tables over every section in a catalog
#[derive(Debug)]
pub struct SectionIndex<'a> {
    by_id: HashMap<&'a str, &'a Section>,
    by_legacy_key: HashMap<String, &'a Section>,
    by_cat_section: HashMap<String, &'a Section>,
}

impl<'a> SectionIndex<'a> {
    pub fn build(catalog: &'a Catalog) -> Self {
        let mut by_id = HashMap::new();
        let mut by_legacy_key = HashMap::new();
        let mut by_cat_section = HashMap::new();

        for section in catalog.sections() {
            by_id.insert(section.id.as_str(), section);
            by_legacy_key
                .entry(legacy_key(&section.cat_no, &section.section, &section.time))
                .or_insert(section);
            by_cat_section
                .entry(cat_section_key(&section.cat_no, &section.section))
                .or_insert(section);
        }

        Self {
            by_id,
            by_legacy_key,
            by_cat_section,
        }
    }

    pub fn get(&self, id: &str) -> Option<&'a Section> {
        self.by_id.get(id).copied()
    }

    /// Resolve a saved reference: id, then catalog number + section + time,
    /// then catalog number + section
    pub fn resolve(&self, saved: &SavedSectionRef) -> Option<&'a Section> {
        if let Some(section) = saved.id.as_deref().and_then(|id| self.get(id)) {
            return Some(section);
        }
        let legacy = legacy_key(&saved.cat_no, &saved.section, &saved.time);
        if let Some(section) = self.by_legacy_key.get(&legacy) {
            return Some(*section);
        }
        let key = cat_section_key(&saved.cat_no, &saved.section);
        self.by_cat_section.get(&key).copied()
    }

    /// Resolve a list of saved references, dropping the ones that no longer exist
    pub fn resolve_all(&self, saved: &[SavedSectionRef]) -> Vec<&'a Section> {
        saved.iter().filter_map(|s| self.resolve(s)).collect()
    }
}
