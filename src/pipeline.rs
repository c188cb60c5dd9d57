//! Fetch, normalize and filter: timemap query in, PDF links out.

use tracing::{debug, info, warn};

use crate::client::{FetchError, TimemapClient};
use crate::pdf::{self, PdfResult};
use crate::timemap::{TimemapError, TimemapQuery, TimemapTable};

/// Outcome of listing the PDF captures of a domain.
#[derive(Debug)]
pub enum PdfListing {
    /// At least one PDF capture, in timemap order.
    Found(Vec<PdfResult>),
    /// The timemap answered but held no PDF capture.
    NoPdfs,
    /// The archive could not be reached; nothing was listed.
    Unreachable(FetchError),
}

impl PdfListing {
    /// Results to write. Empty unless PDFs were found.
    pub fn into_results(self) -> Vec<PdfResult> {
        match self {
            Self::Found(results) => results,
            Self::NoPdfs | Self::Unreachable(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Found(results) => results.len(),
            Self::NoPdfs | Self::Unreachable(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Query the timemap and collect a direct link for every PDF capture.
///
/// Transport failures and error statuses are recovered as
/// [`PdfListing::Unreachable`]. A response that cannot be read as a timemap
/// table is an error.
pub async fn collect_pdfs(
    client: &TimemapClient,
    query: &TimemapQuery,
) -> Result<PdfListing, TimemapError> {
    let body = match client.fetch(query).await {
        Ok(body) => body,
        Err(e) => {
            warn!(url = query.target(), "Timemap request failed: {}", e);
            return Ok(PdfListing::Unreachable(e));
        }
    };

    let table = TimemapTable::parse(&body)?;
    let records = table.records()?;
    debug!(
        "Timemap returned {} captures for {}",
        records.len(),
        query.target()
    );

    let results = pdf::filter_pdfs(&records);
    for result in &results {
        debug!("PDF: {}", result.pdffile);
    }

    if results.is_empty() {
        info!("No PDF captures among {} records", records.len());
        return Ok(PdfListing::NoPdfs);
    }

    info!("Found {} PDF captures for {}", results.len(), query.target());
    Ok(PdfListing::Found(results))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_results() {
        let found = PdfListing::Found(vec![PdfResult {
            pdffile: "https://web.archive.org/web/1if_/x".to_string(),
        }]);
        assert_eq!(found.len(), 1);
        assert_eq!(found.into_results().len(), 1);

        assert!(PdfListing::NoPdfs.is_empty());
        assert!(PdfListing::NoPdfs.into_results().is_empty());
    }
}
