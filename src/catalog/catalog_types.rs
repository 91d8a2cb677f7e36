use crate::parser::{Meeting, MeetingBlock, NoTimeReason};
use serde::{Deserialize, Serialize};

/// One row of the registrar's class offerings, as supplied by the data loader
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSection {
    /// Stable identifier from the data source, if it provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub cat_no: String,
    pub section: String,
    pub course_title: String,
    pub instructor: String,
    pub room: String,
    pub units: String,
    pub time: String,
    pub remarks: String,
    pub dept_code: String,
}

/// A class section with its parsed schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub cat_no: String,
    pub section: String,
    pub course_title: String,
    pub instructor: String,
    pub room: String,
    pub units: String,
    pub time: String,
    pub remarks: String,
    pub dept_code: String,
    pub meetings: Vec<Meeting>,
    pub meeting_blocks: Vec<MeetingBlock>,
    pub no_time: bool,
    pub time_reason: Option<NoTimeReason>,
    pub normalized_cat_no: String,
    pub color_class: String,
    pub search_text: String,
}

impl Section {
    /// Whether any block of this section overlaps any block of `other`
    pub fn overlaps(&self, other: &Section) -> bool {
        let theirs = &other.meeting_blocks;
        self.meeting_blocks
            .iter()
            .any(|block| theirs.iter().any(|t| block.overlaps(t)))
    }
}

/// All sections that share a normalized catalog number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub key: String,
    pub cat_no: String,
    pub course_title: String,
    pub sections: Vec<Section>,
}

impl CatalogEntry {
    /// Department code of the entry, taken from its first section
    pub fn dept_marker(&self) -> &str {
        self.sections.first().map_or("", |s| s.dept_code.as_str())
    }
}
