mod output;
mod overrides;

use std::path::PathBuf;

use clap::Parser;
use qcat_core::{AppConfig, OutputFormat};
use qcat_scraper::{analyze_products, CatalogPipeline, InterruptFlag, RunSummary};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "qcat")]
#[command(about = "Collect product catalogs from a quick-commerce service")]
struct Cli {
    /// Category names to scrape (case-insensitive substring match)
    #[arg(short = 'c', long = "category", num_args = 1..)]
    categories: Vec<String>,

    /// List available categories and exit
    #[arg(short = 'l', long)]
    list_categories: bool,

    /// Latitude for location-based listings
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Longitude for location-based listings
    #[arg(long, allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Output format: json, csv or both
    #[arg(short = 'f', long)]
    format: Option<OutputFormat>,

    /// Output directory
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Download product images
    #[arg(long)]
    download_images: bool,

    /// Directory to save images
    #[arg(long)]
    image_dir: Option<PathBuf>,

    /// Pause after each successful request, in seconds
    #[arg(long)]
    delay: Option<f64>,

    /// Maximum pages per category (0 = unlimited)
    #[arg(long)]
    max_pages: Option<u32>,

    /// Print an analysis of each scraped category
    #[arg(long)]
    analyze: bool,

    /// Debug-level logging
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = overrides::apply(qcat_core::load_app_config()?, &cli)?;
    init_tracing(&config, cli.verbose)?;

    let interrupt = InterruptFlag::new();
    interrupt.install_ctrl_c_handler();
    let pipeline = CatalogPipeline::new(&config, interrupt)?;

    if cli.list_categories {
        let listing = pipeline.list_categories().await;
        if listing.is_empty() {
            anyhow::bail!("failed to fetch categories");
        }
        print!("{}", output::format_category_listing(&listing));
        return Ok(());
    }

    let names = if cli.categories.is_empty() {
        config.categories.clone()
    } else {
        cli.categories.clone()
    };
    if names.is_empty() {
        anyhow::bail!("no categories to scrape; pass --category or set QCAT_CATEGORIES");
    }

    tracing::info!(categories = names.len(), "starting scrape");
    let results = pipeline.scrape_categories(&names).await;

    for result in &results {
        println!("Scraped {} products from {}", result.len(), result.category);
        if cli.analyze && !result.is_empty() {
            print!("{}", output::format_analysis(&analyze_products(&result.products)));
        }
    }

    print!(
        "{}",
        output::format_summary(&RunSummary::from_results(&results), &config)
    );

    if pipeline.interrupt().is_requested() {
        tracing::warn!("run was interrupted; results are partial");
    }

    Ok(())
}

fn init_tracing(config: &AppConfig, verbose: bool) -> anyhow::Result<()> {
    let env_filter = if verbose {
        EnvFilter::try_new("debug")?
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))?
    };
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}
