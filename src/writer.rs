//! Result file output.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::pdf::PdfResult;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid result JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Default output file for a domain: `<domain>.json` in the working directory.
///
/// Characters that cannot appear in a file name (a domain may carry a path
/// prefix such as `example.com/reports`) are replaced with `_`.
pub fn default_output_path(domain: &str) -> PathBuf {
    let sanitized: String = domain
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let trimmed = sanitized.trim().trim_matches('_');
    let stem = if trimmed.is_empty() { "results" } else { trimmed };
    PathBuf::from(format!("{}.json", stem))
}

/// Write results as a 2-space indented JSON array, replacing any existing file.
pub fn write_results(path: &Path, results: &[PdfResult]) -> Result<(), OutputError> {
    let json = serde_json::to_string_pretty(results)?;
    fs::write(path, json).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Wrote {} results to {}", results.len(), path.display());
    Ok(())
}

/// Read a results file written by [`write_results`].
pub fn read_results(path: &Path) -> Result<Vec<PdfResult>, OutputError> {
    let contents = fs::read_to_string(path).map_err(|source| OutputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(url: &str) -> PdfResult {
        PdfResult {
            pdffile: url.to_string(),
        }
    }

    #[test]
    fn default_path_from_domain() {
        assert_eq!(default_output_path("example.com"), PathBuf::from("example.com.json"));
        assert_eq!(
            default_output_path("example.com/reports/"),
            PathBuf::from("example.com_reports.json")
        );
        assert_eq!(default_output_path("///"), PathBuf::from("results.json"));
    }

    #[test]
    fn write_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        write_results(&path, &[]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
        assert!(read_results(&path).unwrap().is_empty());
    }

    #[test]
    fn write_two_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        write_results(&path, &[result("https://web.archive.org/web/1if_/a.pdf")]).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[\n  {\n    \"pdffile\": \"https://web.archive.org/web/1if_/a.pdf\"\n  }\n]"
        );
    }

    #[test]
    fn write_then_read_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let results = vec![
            result("https://web.archive.org/web/20200101000000if_/http://example.com/c.pdf"),
            result("https://web.archive.org/web/20100101000000if_/http://example.com/a.pdf"),
            result("https://web.archive.org/web/20150101000000if_/http://example.com/b.pdf"),
        ];

        write_results(&path, &results).unwrap();
        assert_eq!(read_results(&path).unwrap(), results);

        let raw: Vec<serde_json::Map<String, serde_json::Value>> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.len(), 3);
        assert!(raw.iter().all(|obj| obj.len() == 1 && obj.contains_key("pdffile")));
    }

    #[test]
    fn write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        fs::write(&path, "previous contents that are longer than the new ones").unwrap();

        write_results(&path, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.json");

        let err = write_results(&path, &[]).unwrap_err();
        assert!(matches!(err, OutputError::Write { .. }));
    }

    #[test]
    fn read_rejects_extra_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        fs::write(&path, r#"[{"pdffile":"x","extra":1}]"#).unwrap();

        assert!(matches!(read_results(&path), Err(OutputError::Json(_))));
    }
}
