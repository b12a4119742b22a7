//! # BetFinder
//!
//! Aggregates betting-industry news from four Brazilian sources, filters
//! each source to today's items, scores them against a configurable keyword
//! list, and emits a ranked digest.
//!
//! ## Usage
//!
//! ```sh
//! betfinder --keywords config/keywords.json --output-dir ./digest
//! ```
//!
//! ## Architecture
//!
//! One run is a single pipeline pass:
//! 1. **Configuration**: load the keyword list (fatal if missing)
//! 2. **Fan-out**: every source adapter fetches and extracts concurrently;
//!    a failing source is recorded, never fatal
//! 3. **Scoring/ranking**: candidates are scored by keyword relevance and
//!    the top items kept per source
//! 4. **Output**: a digest line per source on stdout, plus a dated JSON file

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregator;
mod cli;
mod dates;
mod errors;
mod models;
mod outputs;
mod ranking;
mod relevance;
mod scrapers;
mod utils;

use cli::Cli;
use models::SourceResult;
use relevance::ScoreWeights;
use utils::truncate_for_log;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("betfinder starting up");

    let args = Cli::parse();
    debug!(?args.keywords, ?args.output_dir, "Parsed CLI arguments");

    let weights = ScoreWeights {
        title: args.title_weight,
        summary: args.summary_weight,
    };

    let results = match aggregator::aggregate_news(&args.keywords, weights).await {
        Ok(results) => results,
        Err(e) => {
            error!(error = %e, "Aggregation aborted");
            return Err(e.into());
        }
    };

    print_digest(&results);

    let today = Local::now().date_naive();
    if let Err(e) = outputs::json::write_digest(&results, &args.output_dir, today).await {
        error!(error = %e, "Failed to write digest JSON");
        return Err(e);
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        sources = results.len(),
        "Execution complete"
    );

    Ok(())
}

/// Render one digest line per source, with failed sources called out rather
/// than hidden.
fn print_digest(results: &[SourceResult]) {
    for result in results {
        match &result.error {
            Some(message) => {
                println!("{}: no news found, fetch failed: {}", result.source, message);
            }
            None => {
                println!(
                    "{}: {} found, {} relevant",
                    result.source,
                    result.total_found,
                    result.top_items.len()
                );
                for item in &result.top_items {
                    println!(
                        "  [{}] {} ({})",
                        item.score,
                        truncate_for_log(&item.candidate.title, 90),
                        item.candidate.link
                    );
                }
            }
        }
    }
}
