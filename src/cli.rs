//! Command-line interface definitions.
//!
//! This module defines the CLI arguments and options using the `clap` crate.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the digest run.
///
/// # Examples
///
/// ```sh
/// # Defaults: config/keywords.json, digest written under ./digest
/// betfinder
///
/// # Custom keyword list and heavier title weighting
/// betfinder -k ./minhas-palavras.json --title-weight 3
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the keyword list (JSON array of strings)
    #[arg(short, long, default_value = "config/keywords.json")]
    pub keywords: PathBuf,

    /// Output directory for the digest JSON file
    #[arg(short, long, default_value = "digest")]
    pub output_dir: PathBuf,

    /// Score added per keyword found in a title
    #[arg(long, default_value_t = 2)]
    pub title_weight: u32,

    /// Score added per keyword found in a summary
    #[arg(long, default_value_t = 1)]
    pub summary_weight: u32,
}
