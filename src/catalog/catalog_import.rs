//! Loading raw class offerings from JSON or CSV exports

use super::RawSection;
use log::info;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

// Guard against accidentally loading something that is not an offerings export
const MAX_ROWS: usize = 100_000;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Failed to read offerings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid offerings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid offerings CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Unsupported offerings file type: {0}")]
    UnsupportedFormat(String),
    #[error("Too many rows in offerings file (maximum {0})")]
    TooManyRows(usize),
}

/// Read a JSON array of raw sections
pub fn load_sections_json<R: Read>(reader: R) -> Result<Vec<RawSection>, ImportError> {
    let rows: Vec<RawSection> = serde_json::from_reader(reader)?;
    if rows.len() > MAX_ROWS {
        return Err(ImportError::TooManyRows(MAX_ROWS));
    }
    Ok(rows)
}

/// Read raw sections from CSV with a camelCase header row (`catNo,section,...`)
pub fn load_sections_csv<R: Read>(reader: R) -> Result<Vec<RawSection>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();
    for record in csv_reader.deserialize() {
        let mut row: RawSection = record?;
        if row.id.as_deref().is_some_and(str::is_empty) {
            row.id = None;
        }
        rows.push(row);
        if rows.len() > MAX_ROWS {
            return Err(ImportError::TooManyRows(MAX_ROWS));
        }
    }
    Ok(rows)
}

/// Load raw sections, choosing the format from the file extension
pub fn load_sections_from_path(path: &Path) -> Result<Vec<RawSection>, ImportError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    let reader = || -> Result<BufReader<File>, ImportError> {
        Ok(BufReader::new(File::open(path)?))
    };
    let rows = match extension.as_str() {
        "json" => load_sections_json(reader()?)?,
        "csv" => load_sections_csv(reader()?)?,
        other => return Err(ImportError::UnsupportedFormat(other.to_string())),
    };

    info!("Loaded {} offerings from {}", rows.len(), path.display());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_load_json() {
        let data = r#"[
            {"id": "x1", "deptCode": "DISCS", "catNo": "CSCI 20", "section": "A",
             "courseTitle": "Programming", "units": "3", "time": "M-TH 1000-1130",
             "room": "F-227", "instructor": "DOE, JANE", "remarks": ""},
            {"catNo": "MATH 10", "time": "TBA"}
        ]"#;
        let rows = load_sections_json(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id.as_deref(), Some("x1"));
        assert_eq!(rows[0].dept_code, "DISCS");
        assert_eq!(rows[1].course_title, "");
        assert_eq!(rows[1].id, None);
    }

    #[test]
    fn test_load_csv() {
        let data = "id,catNo,section,courseTitle,instructor,room,units,time,remarks,deptCode\n\
                    ,CSCI 20,A,Programming,\"DOE, JANE\",F-227,3,M-TH 1000-1130,,DISCS\n";
        let rows = load_sections_csv(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, None);
        assert_eq!(rows[0].instructor, "DOE, JANE");
        assert_eq!(rows[0].time, "M-TH 1000-1130");
    }

    #[test]
    fn test_load_from_path_by_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("courses.json");
        let mut file = File::create(&path).unwrap();
        write!(file, r#"[{{"catNo": "BIO 10", "time": "W 0800-0900"}}]"#).unwrap();

        let rows = load_sections_from_path(&path).unwrap();
        assert_eq!(rows[0].cat_no, "BIO 10");

        let bad = dir.path().join("courses.xml");
        File::create(&bad).unwrap();
        let result = load_sections_from_path(&bad);
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let result = load_sections_json("{".as_bytes());
        assert!(matches!(result, Err(ImportError::Json(_))));
    }
}
