//! JSON digest output.
//!
//! Serializes the per-source results of one aggregation run to
//! `{output_dir}/{YYYY-MM-DD}.json`. The file is the structured interface
//! consumed by whatever presents the digest; re-running on the same day
//! overwrites it with the fresher result.

use crate::models::SourceResult;
use chrono::NaiveDate;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Write one run's results as a dated JSON file, creating the output
/// directory as needed. Returns the path written.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display()))]
pub async fn write_digest(
    results: &[SourceResult],
    output_dir: &Path,
    date: NaiveDate,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(results)?;

    if let Err(e) = fs::create_dir_all(output_dir).await {
        error!(dir = %output_dir.display(), error = %e, "Failed to create digest dir");
        return Err(e.into());
    }

    let path = output_dir.join(format!("{date}.json"));
    fs::write(&path, json).await?;
    info!(path = %path.display(), sources = results.len(), "Wrote digest JSON");

    Ok(path)
}
