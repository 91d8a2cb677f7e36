//! Ingestion checks for parsed meetings
//
// The catalog builder is the only place meetings are validated; slot merging and
// conflict detection assume every block they see passed through here.

use crate::parser::{Meeting, MINUTES_PER_DAY};
use log::warn;

/// Whether a meeting can be placed on the weekly calendar
pub fn is_valid_meeting(meeting: &Meeting) -> bool {
    !meeting.days.is_empty() && meeting.start < meeting.end && meeting.end <= MINUTES_PER_DAY
}

/// Keep only meetings that fit the calendar, logging the ones dropped
pub fn retain_valid_meetings(cat_no: &str, meetings: Vec<Meeting>) -> Vec<Meeting> {
    meetings
        .into_iter()
        .filter(|meeting| {
            let valid = is_valid_meeting(meeting);
            if !valid {
                warn!(
                    "Dropping out-of-range meeting {}-{} for '{}'",
                    meeting.start, meeting.end, cat_no
                );
            }
            valid
        })
        .collect()
}
