//! Command-line interface.

use std::path::PathBuf;

use anyhow::Context;
use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use tracing::debug;

use waybackpdf::{
    collect_pdfs, default_output_path, status_line, write_results, Config, MessageKind,
    PdfListing, Scheme, TimemapClient, TimemapQuery,
};

#[derive(Parser, Debug)]
#[command(name = "waybackpdf")]
#[command(about = "OSINT tool to list archived PDF files from archive.org for a given website")]
#[command(version)]
pub struct Cli {
    /// The target domain you are looking for files
    #[arg(short, long, env = "WAYBACK_DOMAIN", value_parser = NonEmptyStringValueParser::new())]
    domain: String,

    /// Output file (default: <domain>.json)
    #[arg(short, long, env = "WAYBACK_OUTPUT")]
    output: Option<PathBuf>,

    /// Use HTTP instead of HTTPS for the target domain
    #[arg(long, value_name = "VALUE", num_args = 0..=1, default_missing_value = "true")]
    http: Option<String>,

    /// Start at a given index and skip previous files (accepted, not used)
    #[arg(short, long, allow_negative_numbers = true)]
    resume: Option<i64>,

    /// Configuration file (TOML)
    #[arg(short, long, env = "WAYBACK_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Output file, `<domain>.json` unless `--output` is given.
    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.domain))
    }
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

/// Parse arguments and run.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    execute(cli).await
}

async fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let output = cli.output_path();

    if let Some(resume) = cli.resume {
        debug!("Ignoring --resume {}: results are listed, not downloaded", resume);
    }

    println!("\n{}", status_line(MessageKind::Success, "Web Archive PDF Downloader"));
    println!(
        "{}",
        status_line(MessageKind::Success, format!("Target domain : {}", cli.domain))
    );
    println!(
        "{}",
        status_line(
            MessageKind::Success,
            format!("Output file : {}", output.display())
        )
    );

    if cli.verbose {
        println!(
            "{}",
            status_line(
                MessageKind::Info,
                format!("Timemap endpoint : {}", config.wayback.timemap_url)
            )
        );
    }

    let client = TimemapClient::new(&config.wayback)?;
    let scheme = Scheme::from_http_flag(cli.http.as_deref());
    let query = TimemapQuery::new(&cli.domain, scheme, chrono::Utc::now().timestamp_millis());

    println!("\n{}", status_line(MessageKind::Info, "Requesting PDF list..."));
    let listing = collect_pdfs(&client, &query)
        .await
        .with_context(|| format!("Unreadable timemap response for {}", query.target()))?;

    let mut report = listing_report(&listing).into_iter();
    if let Some(summary) = report.next() {
        println!("\n{}", summary);
    }
    for line in report {
        println!("{}", line);
    }

    let results = listing.into_results();
    println!("\n{}", status_line(MessageKind::Info, "Writing results to file..."));
    write_results(&output, &results)
        .with_context(|| format!("Failed to save results to {}", output.display()))?;

    println!("\n{}", status_line(MessageKind::Info, "Everything's done !"));
    Ok(())
}

/// Console lines for a listing: a summary line, then one line per link.
fn listing_report(listing: &PdfListing) -> Vec<String> {
    match listing {
        PdfListing::Found(results) => {
            let mut lines = Vec::with_capacity(results.len() + 1);
            lines.push(status_line(
                MessageKind::Success,
                format!("Found {} PDF files", results.len()),
            ));
            lines.extend(
                results
                    .iter()
                    .map(|result| status_line(MessageKind::Info, &result.pdffile)),
            );
            lines
        }
        PdfListing::NoPdfs => vec![status_line(MessageKind::Warning, "No PDF files found!")],
        PdfListing::Unreachable(e) => vec![status_line(
            MessageKind::Warning,
            format!("Error connecting to the Wayback server: {}", e),
        )],
    }
}
