//! Source adapters for the Brazilian betting-news sites.
//!
//! Each submodule scrapes one site and normalizes its listing into
//! [`NewsCandidate`]s. All adapters implement [`SourceAdapter`] so the
//! aggregator can hold them as an ordered, heterogeneous list.
//!
//! # Supported sources
//!
//! | Source | Module | Pages fetched | Date policy |
//! |--------|--------|---------------|-------------|
//! | BNLData | [`bnldata`] | homepage + editorias listing | strict on homepage, lenient on editorias |
//! | iGamingBrazil | [`igamingbrazil`] | news listing | strict |
//! | GamesBras | [`gamesbras`] | homepage + one page per article | strict |
//! | GovFazenda | [`govfazenda`] | paginated SPA listing | strict |
//!
//! "Strict" means items with an unknown or non-today date are skipped;
//! "lenient" means they are kept with a null date.
//!
//! # Common behavior
//!
//! - Relative links are resolved against the site base with [`Url::join`]
//! - A malformed individual item is skipped with a [`SkipReason`], never an error
//! - A listing page whose structural container matches nothing fails the
//!   adapter with a page-scoped parse error
//! - Batches are deduplicated by link and returned in listing order

pub mod bnldata;
pub mod gamesbras;
pub mod govfazenda;
pub mod igamingbrazil;

use crate::errors::FetchError;
use crate::models::NewsCandidate;
use async_trait::async_trait;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use reqwest::Client;
use std::collections::{BTreeMap, HashSet};
use std::time::Duration;
use tracing::debug;

/// One news site's extraction capability.
///
/// `fetch` performs the site's whole pipeline (listing fetch, per-item
/// extraction, date filter, dedup) and returns candidates in listing order.
/// `today` is the reference day for the same-day filter, injected by the
/// caller so every adapter filters against the same clock reading.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Fixed identifier shown in results and logs.
    fn name(&self) -> &'static str;

    async fn fetch(&self, today: NaiveDate) -> Result<Vec<NewsCandidate>, FetchError>;
}

/// Why a raw listing item did not become a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// No title text in the expected element.
    MissingTitle,
    /// No href on the expected anchor.
    MissingLink,
    /// The href could not be resolved to an absolute URL.
    UnresolvableLink,
    /// The source's date policy is strict and no date could be parsed.
    UnknownDate,
    /// Dated, but not on the reference day.
    NotToday,
    /// The per-article page fetch failed or was unreadable.
    ArticleUnavailable,
    /// Same link already produced a candidate earlier in the batch.
    DuplicateLink,
}

impl SkipReason {
    fn as_str(self) -> &'static str {
        match self {
            SkipReason::MissingTitle => "missing_title",
            SkipReason::MissingLink => "missing_link",
            SkipReason::UnresolvableLink => "unresolvable_link",
            SkipReason::UnknownDate => "unknown_date",
            SkipReason::NotToday => "not_today",
            SkipReason::ArticleUnavailable => "article_unavailable",
            SkipReason::DuplicateLink => "duplicate_link",
        }
    }
}

/// Outcome of extracting one raw listing item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Kept(NewsCandidate),
    Skipped(SkipReason),
}

/// Collapse per-item outcomes into the final candidate batch.
///
/// Keeps candidates in listing order, drops repeats of an already-seen link,
/// and logs a per-reason tally of everything that was skipped so extraction
/// loss is visible instead of silent.
pub fn keep_candidates(outcomes: Vec<ItemOutcome>, source: &str) -> Vec<NewsCandidate> {
    let mut seen = HashSet::new();
    let mut kept = Vec::new();
    let mut skips: BTreeMap<&'static str, usize> = BTreeMap::new();

    for outcome in outcomes {
        match outcome {
            ItemOutcome::Kept(candidate) => {
                if seen.insert(candidate.link.clone()) {
                    kept.push(candidate);
                } else {
                    *skips.entry(SkipReason::DuplicateLink.as_str()).or_insert(0) += 1;
                }
            }
            ItemOutcome::Skipped(reason) => {
                *skips.entry(reason.as_str()).or_insert(0) += 1;
            }
        }
    }

    if !skips.is_empty() {
        debug!(source, kept = kept.len(), skipped = ?skips, "Dropped items during extraction");
    }
    kept
}

static HTTP: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(20))
        .user_agent("Mozilla/5.0 (compatible; BetFinder/0.1)")
        .build()
        .expect("HTTP client")
});

/// GET a page and return its body, mapping transport failures and non-2xx
/// statuses to [`FetchError`].
///
/// All adapters share one client with a bounded per-request timeout so a
/// single slow site cannot stall the whole run.
pub(crate) async fn fetch_html(url: &str) -> Result<String, FetchError> {
    let response = HTTP
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::http(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    response.text().await.map_err(|e| FetchError::http(url, e))
}
