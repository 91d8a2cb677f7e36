use classgrid::parser::{parse_time_string, Day, NoTimeReason, MINUTES_PER_DAY};
use pretty_assertions::assert_eq;
use test_case::test_case;

fn days(raw: &str) -> Vec<Vec<Day>> {
    parse_time_string(raw)
        .meetings
        .iter()
        .map(|m| m.days.iter().copied().collect())
        .collect()
}

#[test]
fn test_monday_thursday_pair() {
    let parsed = parse_time_string("M-TH 1000-1130");
    assert!(!parsed.no_time);
    assert_eq!(parsed.meetings.len(), 1);
    let meeting = &parsed.meetings[0];
    assert_eq!(
        meeting.days.iter().copied().collect::<Vec<_>>(),
        vec![Day::Mon, Day::Thu]
    );
    assert_eq!((meeting.start, meeting.end), (600, 690));
}

#[test]
fn test_daily_is_monday_to_friday() {
    let parsed = parse_time_string("D 0900-1030");
    assert_eq!(days("D 0900-1030"), vec![Day::WEEKDAYS.to_vec()]);
    assert_eq!(
        (parsed.meetings[0].start, parsed.meetings[0].end),
        (540, 630)
    );
}

#[test]
fn test_multiple_segments() {
    let parsed = parse_time_string("T,TH 1300-1430; SAT 0800-1100");
    assert_eq!(parsed.meetings.len(), 2);
    assert_eq!(
        days("T,TH 1300-1430; SAT 0800-1100"),
        vec![vec![Day::Tue, Day::Thu], vec![Day::Sat]]
    );
    assert_eq!(parsed.meetings[1].start, 480);
}

#[test]
fn test_day_range() {
    assert_eq!(
        days("M-W 0730-0830"),
        vec![vec![Day::Mon, Day::Tue, Day::Wed]]
    );
}

#[test_case("TBA", NoTimeReason::NoScheduledTime ; "tba")]
#[test_case("", NoTimeReason::MissingTime ; "empty")]
#[test_case("   ", NoTimeReason::MissingTime ; "blank")]
#[test_case("ARR 1000-1100", NoTimeReason::NoScheduledTime ; "arranged marker wins")]
#[test_case("TBD", NoTimeReason::NoScheduledTime ; "tbd")]
#[test_case("tba", NoTimeReason::NoScheduledTime ; "marker in any case")]
#[test_case("f 0830-0930", NoTimeReason::UnparsedTime ; "lowercase day token")]
#[test_case("TUTORIAL", NoTimeReason::NoScheduledTime ; "tutorial")]
#[test_case("sometime", NoTimeReason::UnparsedTime ; "garbage")]
#[test_case("M 1100-1000", NoTimeReason::UnparsedTime ; "reversed range")]
fn test_no_time(raw: &str, reason: NoTimeReason) {
    let parsed = parse_time_string(raw);
    assert!(parsed.no_time);
    assert!(parsed.meetings.is_empty());
    assert_eq!(parsed.reason, Some(reason));
}

#[test]
fn test_bad_segments_are_skipped() {
    let parsed = parse_time_string("XYZ 1000-1100; F 0800-0900");
    assert!(!parsed.no_time);
    assert_eq!(days("XYZ 1000-1100; F 0800-0900"), vec![vec![Day::Fri]]);
}

#[test]
fn test_parsing_is_deterministic() {
    let inputs = [
        "M-TH 1000-1130",
        "T-F 0800-0930; SAT 1300-1600",
        "TBA",
        "W 0700-0800",
    ];
    for raw in inputs {
        assert_eq!(parse_time_string(raw), parse_time_string(raw));
    }
}

#[test]
fn test_meetings_are_well_formed() {
    let inputs = [
        "M-TH 1000-1130",
        "D 0900-1030",
        "T,TH 1300-1430; SAT 0800-1100",
        "M-F 0730-0830",
        "SAT 2200-2359",
        "F 830-930",
    ];
    for raw in inputs {
        let parsed = parse_time_string(raw);
        assert!(!parsed.meetings.is_empty(), "{} should parse", raw);
        for meeting in &parsed.meetings {
            assert!(!meeting.days.is_empty());
            assert!(meeting.start < meeting.end);
            assert!(meeting.end <= MINUTES_PER_DAY);
        }
    }
}
