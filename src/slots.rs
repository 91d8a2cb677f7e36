//! Calendar slots for a course's sections
//!
//! [`build_slots`] groups sections by identical `(day, start, end)` blocks, and
//! [`merge_slots`] collapses overlapping slots on the same day into
//! non-overlapping ranges that carry the union of their sections.

use crate::catalog::{Catalog, Section};
use crate::conflicts::find_conflicts;
use crate::parser::{Day, Minutes};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// A time range on one day with the sections meeting in it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot<'a> {
    pub id: String,
    pub day: Day,
    pub start: Minutes,
    pub end: Minutes,
    pub sections: Vec<&'a Section>,
}

/// Output of [`merge_slots`]; ranges on the same day never overlap
pub type MergedSlot<'a> = Slot<'a>;

pub fn slot_id(day: Day, start: Minutes, end: Minutes) -> String {
    format!("{}-{}-{}", day.index(), start, end)
}

impl<'a> Slot<'a> {
    fn new(day: Day, start: Minutes, end: Minutes, sections: Vec<&'a Section>) -> Self {
        Self {
            id: slot_id(day, start, end),
            day,
            start,
            end,
            sections,
        }
    }

    /// Append sections not already present, comparing by id
    fn absorb(&mut self, sections: &[&'a Section]) {
        let mut seen: HashSet<&'a str> = self.sections.iter().map(|&s| s.id.as_str()).collect();
        for &section in sections {
            if seen.insert(section.id.as_str()) {
                self.sections.push(section);
            }
        }
    }
}

/// One slot per distinct `(day, start, end)` block, in first-seen order
///
/// Sections without a time are skipped.
pub fn build_slots<'a>(sections: &[&'a Section]) -> Vec<Slot<'a>> {
    let mut slots: Vec<Slot<'a>> = Vec::new();
    let mut by_key: HashMap<(Day, Minutes, Minutes), usize> = HashMap::new();

    for &section in sections.iter().filter(|s| !s.no_time) {
        for block in &section.meeting_blocks {
            let key = (block.day, block.start, block.end);
            match by_key.get(&key) {
                Some(&index) => slots[index].sections.push(section),
                None => {
                    by_key.insert(key, slots.len());
                    slots.push(Slot::new(block.day, block.start, block.end, vec![section]));
                }
            }
        }
    }

    slots
}

/// Merge overlapping slots day by day
///
/// Output is ordered by day, then start. Merging an already merged list returns it
/// unchanged.
pub fn merge_slots<'a>(slots: &[Slot<'a>]) -> Vec<MergedSlot<'a>> {
    let mut by_day: BTreeMap<Day, Vec<&Slot<'a>>> = BTreeMap::new();
    for slot in slots {
        by_day.entry(slot.day).or_default().push(slot);
    }

    let mut merged = Vec::new();
    for (day, mut day_slots) in by_day {
        day_slots.sort_by_key(|slot| slot.start);

        let mut current: Option<MergedSlot<'a>> = None;
        for slot in day_slots {
            if let Some(acc) = current.as_mut() {
                if slot.start < acc.end {
                    acc.end = acc.end.max(slot.end);
                    acc.absorb(&slot.sections);
                    continue;
                }
            }
            if let Some(done) = current.take() {
                merged.push(done);
            }
            let mut fresh = Slot::new(day, slot.start, slot.end, Vec::new());
            fresh.absorb(&slot.sections);
            current = Some(fresh);
        }
        if let Some(done) = current {
            merged.push(done);
        }
    }

    for slot in &mut merged {
        slot.id = slot_id(slot.day, slot.start, slot.end);
    }
    merged
}

/// A merged slot with its availability against the current schedule
#[derive(Debug, Clone, Serialize)]
pub struct SlotStatus<'a> {
    #[serde(flatten)]
    pub slot: MergedSlot<'a>,
    pub day_label: &'static str,
    /// Every section in the slot conflicts with something already scheduled
    pub is_conflict: bool,
}

/// Mark merged slots whose sections all conflict with the scheduled set
pub fn annotate_slots<'a>(
    merged: &[MergedSlot<'a>],
    scheduled: &[&Section],
) -> Vec<SlotStatus<'a>> {
    merged
        .iter()
        .map(|slot| SlotStatus {
            slot: slot.clone(),
            day_label: slot.day.full_name(),
            is_conflict: !slot.sections.is_empty()
                && slot.sections
                    .iter()
                    .all(|section| !find_conflicts(section, scheduled).is_empty()),
        })
        .collect()
}

/// Slots that can still be picked, per day (every day present), sorted by start
pub fn available_slots_by_day<'a>(
    merged: &[MergedSlot<'a>],
    scheduled: &[&Section],
) -> BTreeMap<Day, Vec<MergedSlot<'a>>> {
    let mut by_day: BTreeMap<Day, Vec<MergedSlot<'a>>> =
        Day::ALL.iter().map(|&d| (d, Vec::new())).collect();
    for status in annotate_slots(merged, scheduled) {
        if !status.is_conflict {
            by_day.entry(status.slot.day).or_default().push(status.slot);
        }
    }
    for slots in by_day.values_mut() {
        slots.sort_by_key(|slot| slot.start);
    }
    by_day
}

/// Other sections of the same course, offered as swaps for a scheduled section
pub fn replacement_sections<'a>(catalog: &'a Catalog, section: &Section) -> Vec<&'a Section> {
    catalog
        .get(&section.normalized_cat_no)
        .into_iter()
        .flat_map(|entry| &entry.sections)
        .filter(|s| s.id != section.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{build_catalog, RawSection};
    use pretty_assertions::assert_eq;

    fn catalog(rows: &[(&str, &str)]) -> Catalog {
        let rows: Vec<RawSection> = rows
            .iter()
            .map(|(section, time)| RawSection {
                id: Some(section.to_string()),
                cat_no: "CSCI 20".to_string(),
                section: section.to_string(),
                time: time.to_string(),
                ..Default::default()
            })
            .collect();
        build_catalog(&rows)
    }

    fn sections(catalog: &Catalog) -> Vec<&Section> {
        catalog.sections().collect()
    }

    fn ids(slot: &Slot) -> Vec<String> {
        slot.sections.iter().map(|s| s.id.clone()).collect()
    }

    #[test]
    fn test_identical_blocks_share_a_slot() {
        let catalog = catalog(&[("A", "M 1000-1100"), ("B", "M 1000-1100"), ("C", "TBA")]);
        let slots = build_slots(&sections(&catalog));
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].id, "0-600-660");
        assert_eq!(ids(&slots[0]), vec!["A", "B"]);
    }

    #[test]
    fn test_overlapping_slots_merge() {
        let catalog = catalog(&[("A", "W 1000-1100"), ("B", "W 1030-1130")]);
        let merged = merge_slots(&build_slots(&sections(&catalog)));
        assert_eq!(merged.len(), 1);
        assert_eq!((merged[0].start, merged[0].end), (600, 690));
        assert_eq!(merged[0].id, "2-600-690");
        assert_eq!(ids(&merged[0]), vec!["A", "B"]);
        assert_eq!(merge_slots(&merged), merged);
    }

    #[test]
    fn test_disjoint_slots_stay_apart() {
        let catalog = catalog(&[("A", "W 1000-1100"), ("B", "W 1140-1240")]);
        let slots = build_slots(&sections(&catalog));
        let merged = merge_slots(&slots);
        assert_eq!(merged, slots);
    }

    #[test]
    fn test_section_listed_once_after_merge() {
        let catalog = catalog(&[("A", "M 1000-1100; M 1030-1130")]);
        let slots = build_slots(&sections(&catalog));
        assert_eq!(slots.len(), 2);

        let merged = merge_slots(&slots);
        assert_eq!(merged.len(), 1);
        assert_eq!((merged[0].start, merged[0].end), (600, 690));
        assert_eq!(ids(&merged[0]), vec!["A"]);
    }

    #[test]
    fn test_touching_slots_stay_apart() {
        let catalog = catalog(&[("A", "F 1000-1100"), ("B", "F 1100-1200")]);
        let merged = merge_slots(&build_slots(&sections(&catalog)));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_chain_merges_and_days_are_independent() {
        let catalog = catalog(&[
            ("A", "T 0800-0900"),
            ("B", "T 0850-1000"),
            ("C", "T 0930-1030; TH 0800-0900"),
            ("D", "TH 1000-1100"),
        ]);
        let merged = merge_slots(&build_slots(&sections(&catalog)));
        let ranges: Vec<(Day, Minutes, Minutes)> =
            merged.iter().map(|s| (s.day, s.start, s.end)).collect();
        assert_eq!(
            ranges,
            vec![
                (Day::Tue, 480, 630),
                (Day::Thu, 480, 540),
                (Day::Thu, 600, 660),
            ]
        );
        assert_eq!(ids(&merged[0]), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_contained_slot_keeps_outer_end() {
        let catalog = catalog(&[("A", "M 0800-1200"), ("B", "M 0900-1000")]);
        let merged = merge_slots(&build_slots(&sections(&catalog)));
        assert_eq!((merged[0].start, merged[0].end), (480, 720));
    }

    #[test]
    fn test_available_slots_hide_fully_conflicting() {
        let catalog = catalog(&[
            ("A", "M 1000-1100"),
            ("B", "T 1000-1100"),
            ("X", "M 1030-1130"),
        ]);
        let a = catalog.sections().find(|s| s.id == "A").unwrap();
        let b = catalog.sections().find(|s| s.id == "B").unwrap();
        let x = catalog.sections().find(|s| s.id == "X").unwrap();

        let merged = merge_slots(&build_slots(&[a, b]));
        let available = available_slots_by_day(&merged, &[x]);
        assert_eq!(available.len(), 6);
        assert!(available[&Day::Mon].is_empty());
        assert_eq!(available[&Day::Tue].len(), 1);

        let statuses = annotate_slots(&merged, &[x]);
        assert!(statuses[0].is_conflict);
        assert_eq!(statuses[0].day_label, "Monday");
    }

    #[test]
    fn test_replacement_sections() {
        let catalog = catalog(&[("A", "M 1000-1100"), ("B", "T 1000-1100")]);
        let a = catalog.sections().find(|s| s.id == "A").unwrap();
        let replacements: Vec<&str> = replacement_sections(&catalog, a)
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(replacements, vec!["B"]);
    }
}
