//! Individual program of study (IPS) courses
//!
//! An IPS is the student's list of required course codes. Codes may be exact
//! catalog numbers or placeholders that the [`CatalogMatcher`] resolves.

use crate::catalog::{Catalog, Section};
use crate::matcher::CatalogMatcher;
use crate::parser::utils::normalize_cat_no;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A course code as entered in a program of study
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IpsCourseInput {
    pub id: Option<String>,
    pub cat_no: String,
    pub course_title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpsCourse {
    pub id: String,
    pub cat_no: String,
    pub course_title: String,
    pub normalized_cat_no: String,
}

/// Drop blank codes and give every course an id
pub fn normalize_ips_courses(courses: &[IpsCourseInput]) -> Vec<IpsCourse> {
    courses
        .iter()
        .enumerate()
        .filter_map(|(index, course)| {
            let normalized_cat_no = normalize_cat_no(&course.cat_no);
            if normalized_cat_no.is_empty() {
                return None;
            }
            let id = course
                .id
                .clone()
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| format!("{}-{}", normalized_cat_no, index));
            Some(IpsCourse {
                id,
                cat_no: course.cat_no.clone(),
                course_title: course.course_title.clone(),
                normalized_cat_no,
            })
        })
        .collect()
}

/// Sections of every entry matching `code`, without repeats
pub fn sections_for_code<'a>(
    matcher: &CatalogMatcher,
    catalog: &'a Catalog,
    code: &str,
) -> Vec<&'a Section> {
    let mut seen = HashSet::new();
    matcher
        .matches(catalog, code)
        .into_iter()
        .flat_map(|entry| entry.sections.iter())
        .filter(|&section| seen.insert(section.id.as_str()))
        .collect()
}

/// Number of scheduled sections per normalized catalog number
pub fn scheduled_count_by_catalog_key(scheduled: &[&Section]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for section in scheduled.iter().filter(|s| !s.normalized_cat_no.is_empty()) {
        *counts.entry(section.normalized_cat_no.clone()).or_insert(0) += 1;
    }
    counts
}

/// Number of scheduled sections satisfying each IPS course, keyed by its normalized code
///
/// Codes that match no catalog entry fall back to the count under their own key.
pub fn scheduled_count_by_ips_course(
    matcher: &CatalogMatcher,
    catalog: &Catalog,
    courses: &[IpsCourse],
    scheduled: &[&Section],
) -> HashMap<String, usize> {
    let by_key = scheduled_count_by_catalog_key(scheduled);
    courses
        .iter()
        .map(|course| {
            let matches = matcher.matches(catalog, &course.cat_no);
            let count = if matches.is_empty() {
                by_key.get(&course.normalized_cat_no).copied().unwrap_or(0)
            } else {
                let keys: HashSet<&str> = matches.iter().map(|entry| entry.key.as_str()).collect();
                keys.iter()
                    .map(|key| by_key.get(*key).copied().unwrap_or(0))
                    .sum()
            };
            (course.normalized_cat_no.clone(), count)
        })
        .collect()
}
