//! Display helpers for minutes and raw time labels

use super::meeting::{Minutes, MINUTES_PER_DAY};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Format minutes since midnight as `9:00 AM`
pub fn format_minutes(total: Minutes) -> String {
    let total = u32::from(total % MINUTES_PER_DAY);
    match NaiveTime::from_hms_opt(total / 60, total % 60, 0) {
        Some(time) => time.format("%-I:%M %p").to_string(),
        None => String::new(),
    }
}

/// Format a range as `9:00 AM - 10:30 AM`
pub fn format_range(start: Minutes, end: Minutes) -> String {
    format!("{} - {}", format_minutes(start), format_minutes(end))
}

/// Visible window of the calendar grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: Minutes,
    pub end: Minutes,
    pub step: Minutes,
}

impl Default for TimeRange {
    fn default() -> Self {
        Self {
            start: 7 * 60,
            end: 21 * 60,
            step: 30,
        }
    }
}

/// Start minute of every grid row in `range`
pub fn time_grid(range: TimeRange) -> Vec<Minutes> {
    if range.step == 0 {
        return Vec::new();
    }
    (range.start..range.end)
        .step_by(range.step as usize)
        .collect()
}

fn day_rank(token: &str) -> Option<u8> {
    let rank = match token {
        "M-TH" => 1,
        "T-F" => 2,
        "D" => 3,
        "M" => 4,
        "T" => 5,
        "W" => 6,
        "TH" => 7,
        "F" => 8,
        "SAT" => 9,
        "SU" => 10,
        _ => return None,
    };
    Some(rank)
}

#[derive(Debug)]
struct TimeslotKey {
    rank: Option<u8>,
    start: String,
    label: String,
}

fn timeslot_key(label: &str) -> TimeslotKey {
    let upper = label.to_uppercase();
    if upper.contains("TUTORIAL") || upper.contains("TBA") {
        return TimeslotKey {
            rank: None,
            start: String::new(),
            label: upper,
        };
    }

    let mut parts = label.split(' ');
    let day_part = parts.next().unwrap_or("");
    let time_part = parts.next().unwrap_or("");
    let start = match time_part.split_once('-') {
        Some((start, _)) => start.to_string(),
        None => "9999".to_string(),
    };

    TimeslotKey {
        rank: day_rank(day_part),
        start,
        label: label.to_string(),
    }
}

fn compare_rank(a: Option<u8>, b: Option<u8>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Order raw time labels for filter menus: pairs and daily first, then single days
/// Mon..Sun, then by start time text. Unscheduled labels sort last.
pub fn sort_timeslots<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    let mut keyed: Vec<(TimeslotKey, &str)> = labels
        .iter()
        .map(|l| (timeslot_key(l.as_ref()), l.as_ref()))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| {
        compare_rank(a.rank, b.rank)
            .then_with(|| a.start.cmp(&b.start))
            .then_with(|| a.label.cmp(&b.label))
    });
    keyed
        .into_iter()
        .map(|(_, label)| label.to_string())
        .collect()
}
