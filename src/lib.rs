//! catalog-search — tiered keyword search over an e-commerce catalog.
//!
//! Given free-text input, the cascade progressively widens the search
//! (exact code match → exact phrase → substring → full-text → group-name
//! match) until it finds a manageable result set, then produces either a
//! single-match redirect or a bounded results listing.

pub mod catalog;
pub mod config;
pub mod history;
pub mod model;
pub mod search;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use catalog::Catalog;
use config::AppConfig;
use model::types::{ProductId, SearchOutcome};
use search::cascade::Evaluator;
use search::query::SearchRequest;

/// Command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "catalog-search",
    version,
    about = "Tiered keyword search over a product catalog"
)]
pub struct Cli {
    /// Path to the TOML config (defaults to platform config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one keyword search against a catalog file
    Search {
        /// Free-text keyword input
        keyword: String,

        /// Path to the catalog JSON file
        #[arg(long)]
        catalog: PathBuf,

        /// Only include products at or above this price
        #[arg(long)]
        min_price: Option<f64>,

        /// Only include products at or below this price
        #[arg(long)]
        max_price: Option<f64>,

        /// Restrict the search to these product ids (comma-separated)
        #[arg(long, value_delimiter = ',')]
        section: Option<Vec<i64>>,

        /// Override the configured maximum number of results
        #[arg(long)]
        limit: Option<usize>,

        /// Emit the outcome as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AppConfig::load_default().context("loading default config")?,
    };

    match cli.command {
        Commands::Search {
            keyword,
            catalog,
            min_price,
            max_price,
            section,
            limit,
            json,
        } => run_search(
            config, &keyword, &catalog, min_price, max_price, section, limit, json,
        ),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_search(
    mut config: AppConfig,
    keyword: &str,
    catalog_path: &Path,
    min_price: Option<f64>,
    max_price: Option<f64>,
    section: Option<Vec<i64>>,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let catalog = Catalog::load(catalog_path)
        .with_context(|| format!("loading catalog from {}", catalog_path.display()))?;
    if let Some(limit) = limit {
        config.search.maximum_results = limit;
    }
    config.validate()?;

    let mut request = SearchRequest::new(keyword).with_price_range(min_price, max_price);
    if let Some(ids) = section {
        request = request.with_section(ids.into_iter().map(ProductId).collect());
    }

    let outcome = Evaluator::new(&catalog, &config).evaluate(&request);

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&catalog, &config, &outcome);
    }
    Ok(())
}

fn print_outcome(catalog: &Catalog, config: &AppConfig, outcome: &SearchOutcome) {
    let url = catalog.redirect_url(outcome, &config.search.results_path);
    match outcome {
        SearchOutcome::Product { id, tier } => {
            let title = catalog
                .product(*id)
                .map(|p| p.title.as_str())
                .unwrap_or("<unknown>");
            println!("match [{tier}]: {title}");
            println!("redirect: {url}");
        }
        SearchOutcome::Group { id, tier } => {
            let title = catalog
                .group(*id)
                .map(|g| g.title.as_str())
                .unwrap_or("<unknown>");
            println!("group match [{tier}]: {title}");
            println!("redirect: {url}");
        }
        SearchOutcome::Results { ids } => {
            println!("{} result(s)", ids.len());
            for id in ids {
                if let Some(p) = catalog.product(*id) {
                    println!("  {:>6}  {:<40} {:>10.2}", p.id.0, p.title, p.price);
                }
            }
            println!("redirect: {url}");
        }
    }
}
