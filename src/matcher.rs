//! Resolution of program-of-study course codes to catalog entries
//!
//! A program of study lists some requirements as placeholders ("NATSC 10",
//! "PE 1", "IE 2") instead of concrete catalog numbers. The matcher checks the code
//! against an ordered rule table; the first rule whose prefix matches decides which
//! entries qualify, and later rules are not consulted. Codes that no rule claims
//! are compared to catalog numbers exactly, ignoring case and whitespace.
//!
//! The rule table is plain data so it can be loaded from configuration when the
//! registrar's department codes change.

use crate::catalog::{Catalog, CatalogEntry};
use crate::parser::utils::{compact_text, split_cat_no};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Department code that marks interdisciplinary elective offerings
pub const INTERDISCIPLINARY_ELECTIVE_MARKER: &str = "**IE**";

/// Department code of physical education offerings
pub const PE_MARKER: &str = "PE";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MatcherError {
    #[error("Match rule has no prefixes")]
    EmptyPrefixes,
    #[error("Invalid match rule pattern: {0}")]
    InvalidPattern(String),
}

/// Extra requirement an elective placeholder number puts on the catalog number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectiveRestriction {
    pub number: String,
    pub cat_no_prefix: String,
}

/// One entry of the rule table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchRule {
    /// `NATSC 10` → any listed department with course number 10
    DeptGroup {
        prefixes: Vec<String>,
        departments: Vec<String>,
    },
    /// `NSTP 1` → catalog numbers starting with `NSTP 1`
    CatNoPrefix {
        prefixes: Vec<String>,
        cat_no_prefix: String,
    },
    /// `ISCS 30.x` → department ISCS with a number starting with 30
    DeptNumberPrefix {
        prefixes: Vec<String>,
        department: String,
        number_prefix: String,
    },
    /// `IE n` → any entry carrying the elective marker, with per-number restrictions
    Elective {
        prefixes: Vec<String>,
        marker: String,
        restrictions: Vec<ElectiveRestriction>,
    },
    /// `PE 1` and synonyms → any entry carrying the department marker
    DeptMarker {
        prefixes: Vec<String>,
        marker: String,
    },
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// The registrar's placeholder conventions, in priority order
pub fn default_rules() -> Vec<MatchRule> {
    vec![
        MatchRule::DeptGroup {
            prefixes: strings(&["NATSC"]),
            departments: strings(&["CHEM", "ENVI", "BIO", "PHYS"]),
        },
        MatchRule::DeptGroup {
            prefixes: strings(&["FLC"]),
            departments: strings(&["JPN", "KRN", "CSP", "FRE", "GER", "ITA", "RUSS", "SPA"]),
        },
        MatchRule::CatNoPrefix {
            prefixes: strings(&["NSTP"]),
            cat_no_prefix: "NSTP".to_string(),
        },
        MatchRule::CatNoPrefix {
            prefixes: strings(&["PHILO"]),
            cat_no_prefix: "PHILO".to_string(),
        },
        MatchRule::DeptNumberPrefix {
            prefixes: strings(&["ISCS"]),
            department: "ISCS".to_string(),
            number_prefix: "30".to_string(),
        },
        MatchRule::Elective {
            prefixes: strings(&["IE"]),
            marker: INTERDISCIPLINARY_ELECTIVE_MARKER.to_string(),
            restrictions: vec![ElectiveRestriction {
                number: "1".to_string(),
                cat_no_prefix: "ENE".to_string(),
            }],
        },
        MatchRule::DeptMarker {
            prefixes: strings(&["PATHFIT", "PEPC", "PHYED", "PE"]),
            marker: PE_MARKER.to_string(),
        },
    ]
}

impl MatchRule {
    pub fn prefixes(&self) -> &[String] {
        match self {
            MatchRule::DeptGroup { prefixes, .. }
            | MatchRule::CatNoPrefix { prefixes, .. }
            | MatchRule::DeptNumberPrefix { prefixes, .. }
            | MatchRule::Elective { prefixes, .. }
            | MatchRule::DeptMarker { prefixes, .. } => prefixes,
        }
    }

    /// Whether the rule claims a code, given the text after its prefix
    fn claims(&self, rest: &str) -> bool {
        match self {
            MatchRule::DeptNumberPrefix { number_prefix, .. } => {
                rest.starts_with(number_prefix.as_str())
            }
            _ => true,
        }
    }

    /// Whether `entry` satisfies the rule for a code whose text after the prefix is `rest`
    pub fn accepts(&self, rest: &str, entry: &CatalogEntry) -> bool {
        let (dept, num) = split_cat_no(&entry.cat_no);
        match self {
            MatchRule::DeptGroup { departments, .. } => {
                !rest.is_empty()
                    && !dept.is_empty()
                    && !num.is_empty()
                    && departments.iter().any(|d| d.eq_ignore_ascii_case(&dept))
                    && compact_text(&num) == compact_text(rest)
            }
            MatchRule::CatNoPrefix { cat_no_prefix, .. } => match leading_digits(rest) {
                Some(digits) => entry
                    .cat_no
                    .to_uppercase()
                    .starts_with(&format!("{} {}", cat_no_prefix.to_uppercase(), digits)),
                None => false,
            },
            MatchRule::DeptNumberPrefix { department, number_prefix, .. } => {
                dept.eq_ignore_ascii_case(department) && num.starts_with(number_prefix.as_str())
            }
            MatchRule::Elective { marker, restrictions, .. } => {
                if entry.dept_marker() != marker {
                    return false;
                }
                let digits = leading_digits(rest).unwrap_or("");
                match restrictions.iter().find(|r| r.number == digits) {
                    Some(restriction) => entry
                        .cat_no
                        .to_uppercase()
                        .starts_with(&restriction.cat_no_prefix.to_uppercase()),
                    None => true,
                }
            }
            MatchRule::DeptMarker { marker, .. } => entry.dept_marker() == marker,
        }
    }
}

fn leading_digits(value: &str) -> Option<&str> {
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    if end == 0 {
        None
    } else {
        Some(&value[..end])
    }
}

#[derive(Debug, Clone)]
struct CompiledRule {
    rule: MatchRule,
    trigger: Regex,
}

impl CompiledRule {
    fn compile(rule: MatchRule) -> Result<Self, MatcherError> {
        let mut prefixes: Vec<&str> = rule.prefixes().iter().map(|p| p.trim()).collect();
        prefixes.retain(|p| !p.is_empty());
        if prefixes.is_empty() {
            return Err(MatcherError::EmptyPrefixes);
        }
        // Longest first so `PEPC` is tried before `PE`
        prefixes.sort_by_key(|p| std::cmp::Reverse(p.len()));
        let alternatives: Vec<String> = prefixes.iter().map(|p| regex::escape(p)).collect();
        let pattern = format!(r"(?i)^(?:{})([\s\d].*)?$", alternatives.join("|"));
        let trigger = Regex::new(&pattern)
            .map_err(|e| MatcherError::InvalidPattern(e.to_string()))?;
        Ok(Self { rule, trigger })
    }

    /// Text after the prefix when this rule claims `code`
    fn claim(&self, code: &str) -> Option<String> {
        let caps = self.trigger.captures(code)?;
        let rest = caps.get(1).map_or("", |m| m.as_str().trim()).to_string();
        if self.rule.claims(&rest) {
            Some(rest)
        } else {
            None
        }
    }
}

/// Compiled rule table
#[derive(Debug, Clone)]
pub struct CatalogMatcher {
    rules: Vec<CompiledRule>,
}

impl CatalogMatcher {
    pub fn new(rules: Vec<MatchRule>) -> Result<Self, MatcherError> {
        let rules = rules
            .into_iter()
            .map(CompiledRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// The rule that claims `code`, if any, with the text after its prefix
    pub fn rule_for(&self, code: &str) -> Option<(&MatchRule, String)> {
        let code = code.trim();
        self.rules
            .iter()
            .find_map(|c| c.claim(code).map(|rest| (&c.rule, rest)))
    }

    /// All entries matching a free-text course code, in catalog order
    pub fn matches<'a>(&self, catalog: &'a Catalog, code: &str) -> Vec<&'a CatalogEntry> {
        let code = code.trim();
        if code.is_empty() {
            return Vec::new();
        }

        let matched: Vec<&'a CatalogEntry> = match self.rule_for(code) {
            Some((rule, rest)) => {
                debug!("Course code '{}' handled by rule {:?}", code, rule);
                catalog
                    .entries()
                    .filter(|entry| rule.accepts(&rest, entry))
                    .collect()
            }
            None => {
                let wanted = compact_text(code);
                catalog
                    .entries()
                    .filter(|entry| compact_text(&entry.cat_no) == wanted)
                    .collect()
            }
        };

        debug!("Course code '{}' matched {} entries", code, matched.len());
        matched
    }
}

impl Default for CatalogMatcher {
    fn default() -> Self {
        Self::new(default_rules()).expect("default match rules compile")
    }
}

static DEFAULT_MATCHER: Lazy<CatalogMatcher> = Lazy::new(CatalogMatcher::default);

/// Match with the default rule table
pub fn match_catalog<'a>(catalog: &'a Catalog, code: &str) -> Vec<&'a CatalogEntry> {
    DEFAULT_MATCHER.matches(catalog, code)
}
