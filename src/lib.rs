//! waybackpdf - list archived PDF documents of a website.
//!
//! Queries the Wayback Machine timemap index for a domain, keeps the captures
//! whose MIME type is `application/pdf` and turns each one into a direct
//! archive link that can be fetched without the Wayback toolbar.

pub mod client;
pub mod config;
pub mod output;
pub mod pdf;
pub mod pipeline;
pub mod timemap;
pub mod writer;

pub use client::{ClientError, FetchError, TimemapClient};
pub use config::{Config, ConfigError};
pub use output::{status_line, MessageKind};
pub use pdf::{build_pdf_url, filter_pdfs, PdfResult, PDF_MIMETYPE};
pub use pipeline::{collect_pdfs, PdfListing};
pub use timemap::{
    FileRecord, QueryParams, Scheme, TimemapError, TimemapQuery, TimemapTable,
    WAYBACK_TIMEMAP_URL,
};
pub use writer::{default_output_path, read_results, write_results, OutputError};
