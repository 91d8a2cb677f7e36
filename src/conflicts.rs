//! Conflict detection between sections
//!
//! Two sections conflict when any of their meeting blocks fall on the same day and
//! their half-open ranges overlap. Nothing here decides which section to keep.

use crate::catalog::Section;
use crate::parser::{Day, MeetingBlock};
use serde::Serialize;
use std::collections::BTreeMap;

/// Scheduled sections that overlap `candidate`, each reported once
///
/// A section without meeting blocks never conflicts. A scheduled entry with the
/// candidate's own id is ignored.
pub fn find_conflicts<'a>(candidate: &Section, scheduled: &[&'a Section]) -> Vec<&'a Section> {
    if candidate.meeting_blocks.is_empty() {
        return Vec::new();
    }

    scheduled
        .iter()
        .copied()
        .filter(|s| s.id != candidate.id && candidate.overlaps(s))
        .collect()
}

/// Whether `candidate` can be added without overlapping anything scheduled
pub fn fits_schedule(candidate: &Section, scheduled: &[&Section]) -> bool {
    find_conflicts(candidate, scheduled).is_empty()
}

/// Every unordered pair of scheduled sections that overlap
pub fn conflicting_pairs<'a>(scheduled: &[&'a Section]) -> Vec<(&'a Section, &'a Section)> {
    let mut pairs = Vec::new();
    for (i, &first) in scheduled.iter().enumerate() {
        for &second in &scheduled[i + 1..] {
            if first.id != second.id && first.overlaps(second) {
                pairs.push((first, second));
            }
        }
    }
    pairs
}

/// A meeting block tagged with the section it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduledBlock<'a> {
    #[serde(flatten)]
    pub block: MeetingBlock,
    pub section: &'a Section,
}

/// Flatten a schedule into its meeting blocks
pub fn expand_schedule_blocks<'a>(scheduled: &[&'a Section]) -> Vec<ScheduledBlock<'a>> {
    scheduled
        .iter()
        .flat_map(|&section| {
            section
                .meeting_blocks
                .iter()
                .map(move |&block| ScheduledBlock { block, section })
        })
        .collect()
}

/// Scheduled blocks per day (every day present), sorted by start
pub fn scheduled_blocks_by_day<'a>(
    scheduled: &[&'a Section],
) -> BTreeMap<Day, Vec<ScheduledBlock<'a>>> {
    let mut by_day: BTreeMap<Day, Vec<ScheduledBlock<'a>>> =
        Day::ALL.iter().map(|&d| (d, Vec::new())).collect();
    for block in expand_schedule_blocks(scheduled) {
        by_day.entry(block.block.day).or_default().push(block);
    }
    for blocks in by_day.values_mut() {
        blocks.sort_by_key(|b| b.block.start);
    }
    by_day
}
