use anyhow::{Context, Result};
use clap::Parser;
use std::{path::PathBuf, time::Duration};
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;
use usaco_scraper::{write_output, HttpClient, Level, UsacoScraperBuilder, DEFAULT_BASE_URL};

/// Scrape USACO problems, test data and solutions into a JSON file.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// File to write the scraped problems to
    #[arg(short, long, default_value = "output.json")]
    output: PathBuf,
    /// First position in the contest list to scrape
    #[arg(long, default_value_t = 3)]
    start: usize,
    /// Position in the contest list to stop before
    #[arg(long, default_value_t = 10)]
    end: usize,
    /// Divisions to keep; may be repeated
    #[arg(short, long = "level", default_value = "silver")]
    levels: Vec<Level>,
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: Url,
    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let scraper = UsacoScraperBuilder::default()
        .base_url(args.base_url)
        .contests(args.start..args.end)
        .levels(args.levels)
        .build()?;

    let client = HttpClient::new(args.timeout.map(Duration::from_secs))?;
    let output = scraper.scrape(client).await?;

    write_output(&args.output, &output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!("done");
    Ok(())
}
