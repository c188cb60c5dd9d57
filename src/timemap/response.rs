//! Timemap JSON table parsing.
//!
//! The body is parsed into a [`TimemapTable`] and validated before any record
//! is built, so a ragged row is rejected instead of being zipped against the
//! wrong columns.

use std::collections::HashMap;

use thiserror::Error;

/// Columns every record must carry to be turned into a result.
pub const REQUIRED_COLUMNS: &[&str] = &["original", "mimetype", "timestamp"];

/// Errors from timemap response parsing.
#[derive(Debug, Error)]
pub enum TimemapError {
    #[error("Failed to parse timemap JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed timemap response: {0}")]
    MalformedResponse(String),

    #[error("Timemap response has no '{0}' column")]
    MissingColumn(String),
}

/// Header row plus data rows, as returned with `output=json`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimemapTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TimemapTable {
    /// Parse a timemap response body.
    ///
    /// An empty body and an empty array both mean the archive holds no
    /// captures for the prefix; they yield an empty table.
    pub fn parse(body: &str) -> Result<Self, TimemapError> {
        if body.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut rows: Vec<Vec<String>> = serde_json::from_str(body)?;
        if rows.is_empty() {
            return Ok(Self::default());
        }

        let header = rows.remove(0);
        Self::from_rows(header, rows)
    }

    /// Build a table from an explicit header and data rows.
    ///
    /// Every data row must have exactly as many fields as the header.
    pub fn from_rows(header: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, TimemapError> {
        if header.is_empty() {
            return Err(TimemapError::MalformedResponse(
                "header row is empty".to_string(),
            ));
        }

        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != header.len())
        {
            return Err(TimemapError::MalformedResponse(format!(
                "row {} has {} fields, header has {}",
                index + 1,
                row.len(),
                header.len()
            )));
        }

        Ok(Self { header, rows })
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Number of data rows (header excluded).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Zip every data row with the header into a [`FileRecord`].
    ///
    /// Fails with [`TimemapError::MissingColumn`] when the header lacks one of
    /// [`REQUIRED_COLUMNS`]. Record order follows row order.
    pub fn records(&self) -> Result<Vec<FileRecord>, TimemapError> {
        if self.header.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|column| !self.header.iter().any(|h| h == *column))
        {
            return Err(TimemapError::MissingColumn((*missing).to_string()));
        }

        Ok(self
            .rows
            .iter()
            .map(|row| FileRecord {
                fields: self.header.iter().cloned().zip(row.iter().cloned()).collect(),
            })
            .collect())
    }
}

/// One capture with named field access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    fields: HashMap<String, String>,
}

impl FileRecord {
    /// Get a field value by column name.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(|s| s.as_str())
    }

    /// The captured URL.
    pub fn original(&self) -> &str {
        self.get("original").unwrap_or_default()
    }

    pub fn mimetype(&self) -> &str {
        self.get("mimetype").unwrap_or_default()
    }

    /// Capture timestamp (`YYYYMMDDhhmmss`).
    pub fn timestamp(&self) -> &str {
        self.get("timestamp").unwrap_or_default()
    }

    /// Number of populated columns.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"[
        ["original","mimetype","timestamp","endtimestamp","groupcount","uniqcount"],
        ["https://example.com/a.pdf","application/pdf","20200101000000","20210101000000","3","2"],
        ["https://example.com/","text/html","20190505120000","20230101000000","40","12"],
        ["https://example.com/b.pdf","application/pdf","20180303030303","20180303030303","1","1"]
    ]"#;

    #[test]
    fn parse_well_formed_response() {
        let table = TimemapTable::parse(BODY).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.header().len(), 6);

        let records = table.records().unwrap();
        assert_eq!(records.len(), 3);
        for record in &records {
            assert_eq!(record.len(), 6);
            for column in table.header() {
                assert!(record.get(column).is_some(), "missing {column}");
            }
        }

        assert_eq!(records[0].original(), "https://example.com/a.pdf");
        assert_eq!(records[0].mimetype(), "application/pdf");
        assert_eq!(records[0].timestamp(), "20200101000000");
        assert_eq!(records[0].get("groupcount"), Some("3"));
        assert_eq!(records[1].mimetype(), "text/html");
        assert_eq!(records[2].original(), "https://example.com/b.pdf");
    }

    #[test]
    fn parse_empty_body_and_array() {
        assert!(TimemapTable::parse("").unwrap().is_empty());
        assert!(TimemapTable::parse("  \n ").unwrap().is_empty());

        let table = TimemapTable::parse("[]").unwrap();
        assert!(table.is_empty());
        assert!(table.records().unwrap().is_empty());
    }

    #[test]
    fn parse_header_only() {
        let table = TimemapTable::parse(r#"[["original","mimetype","timestamp"]]"#).unwrap();
        assert!(table.is_empty());
        assert!(table.records().unwrap().is_empty());
    }

    #[test]
    fn parse_invalid_json() {
        assert!(matches!(
            TimemapTable::parse("<html>busy</html>"),
            Err(TimemapError::Json(_))
        ));
        assert!(matches!(
            TimemapTable::parse(r#"{"error":"nope"}"#),
            Err(TimemapError::Json(_))
        ));
    }

    #[test]
    fn reject_empty_header_row() {
        assert!(matches!(
            TimemapTable::parse("[[]]"),
            Err(TimemapError::MalformedResponse(_))
        ));
    }

    #[test]
    fn reject_short_and_long_rows() {
        let short = r#"[["original","mimetype","timestamp"],["https://example.com/a.pdf","application/pdf"]]"#;
        match TimemapTable::parse(short) {
            Err(TimemapError::MalformedResponse(msg)) => {
                assert_eq!(msg, "row 1 has 2 fields, header has 3");
            }
            other => panic!("expected malformed response, got {other:?}"),
        }

        let long = r#"[["original","mimetype"],["a","b"],["a","b","c"]]"#;
        match TimemapTable::parse(long) {
            Err(TimemapError::MalformedResponse(msg)) => {
                assert_eq!(msg, "row 2 has 3 fields, header has 2");
            }
            other => panic!("expected malformed response, got {other:?}"),
        }
    }

    #[test]
    fn reject_missing_required_column() {
        let table =
            TimemapTable::parse(r#"[["original","timestamp"],["https://example.com","20200101000000"]]"#)
                .unwrap();
        match table.records() {
            Err(TimemapError::MissingColumn(column)) => assert_eq!(column, "mimetype"),
            other => panic!("expected missing column, got {other:?}"),
        }
    }
}
