//! Meeting time parser
//!
//! Turns the registrar's free-form time column (`"M-TH 1000-1130"`,
//! `"T 0800-0930; TH 1300-1430"`, `"TBA"`) into structured [`Meeting`]s.
//! The parser never fails: unrecognized segments are skipped and a string with no
//! usable segment is reported as having no time, together with a [`NoTimeReason`].
pub mod day_tokens;
pub mod format;
pub mod meeting;
pub mod utils;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use day_tokens::expand_day_token;
pub use format::{format_minutes, format_range, sort_timeslots, time_grid, TimeRange};
pub use meeting::{is_time_overlap, Day, Meeting, MeetingBlock, Minutes, MINUTES_PER_DAY};

static NO_TIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(TBA|TUTORIAL|ARR|TBD)").unwrap());

static SEGMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z,-]+) (\d{3,4})-(\d{3,4})$").unwrap());

/// Why a time string produced no meetings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoTimeReason {
    /// The time column was empty
    MissingTime,
    /// The column carries a marker such as TBA or TUTORIAL
    NoScheduledTime,
    /// Text was present but no segment could be parsed
    UnparsedTime,
}

impl NoTimeReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoTimeReason::MissingTime => "missing time",
            NoTimeReason::NoScheduledTime => "no scheduled time",
            NoTimeReason::UnparsedTime => "unparsed time",
        }
    }
}

impl fmt::Display for NoTimeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of parsing one time string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTime {
    pub meetings: Vec<Meeting>,
    pub no_time: bool,
    pub reason: Option<NoTimeReason>,
}

impl ParsedTime {
    fn scheduled(meetings: Vec<Meeting>) -> Self {
        Self {
            meetings,
            no_time: false,
            reason: None,
        }
    }

    fn no_time(reason: NoTimeReason) -> Self {
        Self {
            meetings: Vec::new(),
            no_time: true,
            reason: Some(reason),
        }
    }

    /// Reason as display text, empty when the string had a schedule
    pub fn reason_str(&self) -> &'static str {
        self.reason.map(|r| r.as_str()).unwrap_or("")
    }
}

/// Parse a `"HMM"` or `"HHMM"` clock value into minutes since midnight
pub fn parse_time_part(value: &str) -> Option<Minutes> {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    let (hours, minutes) = match digits.len() {
        3 => digits.split_at(1),
        4 => digits.split_at(2),
        _ => return None,
    };
    let hours: Minutes = hours.parse().ok()?;
    let minutes: Minutes = minutes.parse().ok()?;
    if minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Parse one `;`-free segment such as `"T,TH 1300-1430"`
pub fn parse_segment(segment: &str) -> Option<Meeting> {
    let caps = SEGMENT_RE.captures(segment)?;
    let days = expand_day_token(&caps[1])?;
    let start = parse_time_part(&caps[2])?;
    let end = parse_time_part(&caps[3])?;
    Meeting::new(days, start, end)
}

/// Parse a raw meeting time string
pub fn parse_time_string(raw: &str) -> ParsedTime {
    let time = raw.trim();
    if time.is_empty() {
        return ParsedTime::no_time(NoTimeReason::MissingTime);
    }

    if NO_TIME_RE.is_match(time) {
        return ParsedTime::no_time(NoTimeReason::NoScheduledTime);
    }

    let cleaned = utils::collapse_whitespace(&time.replace("()", ""));
    let meetings: Vec<Meeting> = cleaned
        .split(';')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .filter_map(|segment| {
            let meeting = parse_segment(segment);
            if meeting.is_none() {
                debug!("Skipping unparsed time segment '{}' in '{}'", segment, raw);
            }
            meeting
        })
        .collect();

    if meetings.is_empty() {
        return ParsedTime::no_time(NoTimeReason::UnparsedTime);
    }

    ParsedTime::scheduled(meetings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;
    use test_case::test_case;

    #[test_case("1000", Some(600) ; "four digits")]
    #[test_case("900", Some(540) ; "three digits")]
    #[test_case("0730", Some(450) ; "leading zero")]
    #[test_case("1060", None ; "minutes out of range")]
    #[test_case("12", None ; "too short")]
    #[test_case("", None ; "empty")]
    fn test_parse_time_part(input: &str, expected: Option<Minutes>) {
        assert_eq!(parse_time_part(input), expected);
    }

    #[test]
    fn test_parse_multi_segment() {
        let parsed = parse_time_string("T 0800-0930; TH 1300-1430");
        assert!(!parsed.no_time);
        assert_eq!(parsed.reason, None);
        assert_eq!(
            parsed.meetings,
            vec![
                Meeting {
                    days: BTreeSet::from([Day::Tue]),
                    start: 480,
                    end: 570,
                },
                Meeting {
                    days: BTreeSet::from([Day::Thu]),
                    start: 780,
                    end: 870,
                },
            ]
        );
    }

    #[test]
    fn test_bad_segment_is_skipped_not_fatal() {
        let parsed = parse_time_string("W 1300-1430; garbage; X 0800-0900");
        assert_eq!(parsed.meetings.len(), 1);
        assert_eq!(parsed.meetings[0].days, BTreeSet::from([Day::Wed]));
    }

    #[test]
    fn test_empty_parenthesis_and_spacing_are_cleaned() {
        let parsed = parse_time_string("  SAT   0800-1100 () ");
        assert_eq!(parsed.meetings.len(), 1);
        assert_eq!(parsed.meetings[0].start, 480);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let parsed = parse_time_string("M 1130-1000");
        assert!(parsed.no_time);
        assert_eq!(parsed.reason, Some(NoTimeReason::UnparsedTime));
    }

    #[test]
    fn test_reason_strings() {
        assert_eq!(parse_time_string("").reason_str(), "missing time");
        assert_eq!(
            parse_time_string("TUTORIAL").reason_str(),
            "no scheduled time"
        );
        assert_eq!(parse_time_string("sometime").reason_str(), "unparsed time");
        assert_eq!(parse_time_string("F 0800-0900").reason_str(), "");
    }
}
