//! PDF capture selection and direct archive links.

use serde::{Deserialize, Serialize};

use crate::timemap::FileRecord;

/// MIME type kept by the filter. Compared exactly, parameters included.
pub const PDF_MIMETYPE: &str = "application/pdf";

/// Wayback Machine playback base URL.
pub const WAYBACK_WEB_URL: &str = "https://web.archive.org/web/";

/// One entry of the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PdfResult {
    /// Direct archive link to the capture.
    pub pdffile: String,
}

impl PdfResult {
    pub fn from_record(record: &FileRecord) -> Self {
        Self {
            pdffile: build_pdf_url(record.timestamp(), record.original()),
        }
    }
}

/// Build a direct Wayback Machine link (raw content, no toolbar iframe).
///
/// The `if_` flag sits right after the timestamp with no separator.
pub fn build_pdf_url(timestamp: &str, original_url: &str) -> String {
    format!("{}{}if_/{}", WAYBACK_WEB_URL, timestamp, original_url)
}

pub fn is_pdf(record: &FileRecord) -> bool {
    record.mimetype() == PDF_MIMETYPE
}

/// Keep PDF captures and map each to its direct link, preserving order.
pub fn filter_pdfs(records: &[FileRecord]) -> Vec<PdfResult> {
    records
        .iter()
        .filter(|record| is_pdf(record))
        .map(PdfResult::from_record)
        .collect()
}
