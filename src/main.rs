mod export;
mod fetch;
mod parser;

use std::time::Instant;

use clap::Parser;
use tracing::warn;

use export::Format;

const DEFAULT_URL: &str = "https://www.sih.gov.in/sih2025PS";

#[derive(Parser)]
#[command(
    name = "sih_scraper",
    about = "Scrape SIH 2025 problem statements and export to CSV/JSON/XLSX"
)]
struct Cli {
    /// Listing page URL
    #[arg(long, default_value = DEFAULT_URL)]
    url: String,

    /// Output file base name (extension appended per format)
    #[arg(long, default_value = "sih2025_problem_statements")]
    out_base: String,

    /// Formats to produce
    #[arg(long, value_enum, num_args = 1.., default_values = ["csv", "json", "xlsx"])]
    formats: Vec<Format>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    println!("Fetching: {}", cli.url);
    let html = fetch::fetch_html(&cli.url).await?;

    let records = parser::parse_listing(&html);
    println!("Found {} problem statements.", records.len());
    if records.is_empty() {
        warn!("zero records scraped; output files will be empty");
    }

    let written = export::export_all(&records, &cli.out_base, &cli.formats)?;
    println!("Exported to: {}", written.join(", "));

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("Done in {:.1}s", elapsed.as_secs_f64());
    }

    Ok(())
}
