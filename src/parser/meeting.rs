//! Structured meeting times produced by the time string parser

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Minutes since midnight
pub type Minutes = u16;

/// Upper bound for a meeting end (midnight of the next day)
pub const MINUTES_PER_DAY: Minutes = 24 * 60;

/// Weekday of a class meeting. Serialized as its index, 0 = Monday through 5 = Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Day {
    Mon = 0,
    Tue = 1,
    Wed = 2,
    Thu = 3,
    Fri = 4,
    Sat = 5,
}

impl Day {
    pub const ALL: [Day; 6] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri, Day::Sat];
    pub const WEEKDAYS: [Day; 5] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Day> {
        Day::ALL.get(index as usize).copied()
    }

    /// Short label used on calendar headers
    pub fn label(self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
        }
    }

    pub fn full_name(self) -> &'static str {
        match self {
            Day::Mon => "Monday",
            Day::Tue => "Tuesday",
            Day::Wed => "Wednesday",
            Day::Thu => "Thursday",
            Day::Fri => "Friday",
            Day::Sat => "Saturday",
        }
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> u8 {
        day.index()
    }
}

impl TryFrom<u8> for Day {
    type Error = String;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Day::from_index(index).ok_or_else(|| format!("day index out of range: {}", index))
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One contiguous time range recurring on a set of weekdays
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    pub days: BTreeSet<Day>,
    pub start: Minutes,
    pub end: Minutes,
}

impl Meeting {
    /// Build a meeting, rejecting empty day sets and empty or inverted ranges
    pub fn new(days: BTreeSet<Day>, start: Minutes, end: Minutes) -> Option<Self> {
        if days.is_empty() || start >= end {
            return None;
        }
        Some(Self { days, start, end })
    }

    /// Flatten into one block per day
    pub fn blocks(&self) -> impl Iterator<Item = MeetingBlock> + '_ {
        self.days.iter().map(move |&day| MeetingBlock {
            day,
            start: self.start,
            end: self.end,
        })
    }
}

/// A meeting flattened to a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeetingBlock {
    pub day: Day,
    pub start: Minutes,
    pub end: Minutes,
}

impl MeetingBlock {
    /// Half-open overlap on the same day
    pub fn overlaps(&self, other: &MeetingBlock) -> bool {
        self.day == other.day && is_time_overlap(self.start, self.end, other.start, other.end)
    }
}

/// Half-open interval overlap: `[a_start, a_end)` and `[b_start, b_end)` share a minute
#[inline]
pub fn is_time_overlap(
    a_start: Minutes,
    a_end: Minutes,
    b_start: Minutes,
    b_end: Minutes,
) -> bool {
    a_start < b_end && b_start < a_end
}
