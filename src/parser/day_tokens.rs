//! Day token expansion
//!
//! A day token is the leading part of a meeting segment ("MWF" style codes are not
//! used by the registrar; tokens look like `TH`, `M-TH`, `T,TH` or `D`). Tokens are
//! resolved by an ordered rule table: the first rule whose predicate accepts the
//! token decides the result, even when that result is "invalid".

use super::meeting::Day;
use log::debug;
use std::collections::BTreeSet;

/// Look up a single day name
pub fn day_from_name(name: &str) -> Option<Day> {
    match name {
        "M" => Some(Day::Mon),
        "T" => Some(Day::Tue),
        "W" => Some(Day::Wed),
        "TH" => Some(Day::Thu),
        "F" => Some(Day::Fri),
        "SAT" => Some(Day::Sat),
        _ => None,
    }
}

/// One entry of the day token rule table
#[derive(Debug, Clone, Copy)]
pub enum DayRule {
    /// A fixed token mapping to a fixed day set. `M-TH` and `T-F` are named pairs
    /// in the registrar's convention, not inclusive ranges.
    Named(&'static str, &'static [Day]),
    /// Comma separated day names; every atom must resolve
    List,
    /// `X-Y` inclusive range over the day table
    Range,
    /// A single day name
    Single,
}

pub const DAY_RULES: &[DayRule] = &[
    DayRule::Named("D", &Day::WEEKDAYS),
    DayRule::Named("M-TH", &[Day::Mon, Day::Thu]),
    DayRule::Named("T-F", &[Day::Tue, Day::Fri]),
    DayRule::List,
    DayRule::Range,
    DayRule::Single,
];

impl DayRule {
    pub fn applies(&self, token: &str) -> bool {
        match self {
            DayRule::Named(name, _) => token == *name,
            DayRule::List => token.contains(','),
            DayRule::Range => token.matches('-').count() == 1,
            DayRule::Single => true,
        }
    }

    pub fn expand(&self, token: &str) -> Option<BTreeSet<Day>> {
        match self {
            DayRule::Named(_, days) => Some(days.iter().copied().collect()),
            DayRule::List => token
                .split(',')
                .map(|atom| day_from_name(atom.trim()))
                .collect::<Option<BTreeSet<Day>>>()
                .filter(|days| !days.is_empty()),
            DayRule::Range => {
                let (low, high) = token.split_once('-')?;
                let low = day_from_name(low)?;
                let high = day_from_name(high)?;
                if low > high {
                    return None;
                }
                let days = Day::ALL
                    .iter()
                    .copied()
                    .filter(|d| *d >= low && *d <= high)
                    .collect();
                Some(days)
            }
            DayRule::Single => day_from_name(token).map(|day| BTreeSet::from([day])),
        }
    }
}

/// Expand a day token into its day set, or `None` if the token is not recognized
pub fn expand_day_token(token: &str) -> Option<BTreeSet<Day>> {
    let rule = DAY_RULES.iter().find(|rule| rule.applies(token))?;
    let days = rule.expand(token);
    if days.is_none() {
        debug!("Day token '{}' rejected by rule {:?}", token, rule);
    }
    days
}
