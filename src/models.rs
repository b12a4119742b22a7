//! Data models for news candidates and their scored, aggregated forms.
//!
//! This module defines the core data structures used throughout the pipeline:
//! - [`NewsCandidate`]: a normalized news item extracted by a source adapter
//! - [`ScoredNews`]: a candidate plus its keyword-relevance score
//! - [`SourceResult`]: one source's contribution to a digest run
//!
//! All three serialize to the digest JSON consumed by the display layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A normalized news item extracted from one source's listing.
///
/// Adapters guarantee `title` is non-empty, `link` is an absolute URL unique
/// within the batch, and `published_at` is `None` only where the source's
/// date policy admits undated items.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewsCandidate {
    /// The headline text.
    pub title: String,
    /// Absolute URL of the article. Unique key within one source's batch.
    pub link: String,
    /// Teaser/summary text. Empty for sources whose listings carry none.
    pub summary: String,
    /// Publication day, when the source exposed a parseable date.
    pub published_at: Option<NaiveDate>,
}

/// A candidate together with its relevance score.
///
/// Built once by the scorer and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScoredNews {
    #[serde(flatten)]
    pub candidate: NewsCandidate,
    /// Weighted keyword-match count. Never negative.
    pub score: u32,
}

impl ScoredNews {
    pub fn new(candidate: NewsCandidate, score: u32) -> Self {
        Self { candidate, score }
    }
}

/// One source's contribution to a digest run.
///
/// Exactly one of two shapes: a populated result (`error` absent) or a
/// failed one (`error` present, `total_found == 0`, no items). Constructed
/// once per run and never mutated.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceResult {
    /// Fixed source identifier, e.g. `"GamesBras"`.
    pub source: String,
    /// Candidate count before capping, scoring, and truncation.
    pub total_found: usize,
    /// Relevant items, sorted by descending score, at most ten.
    pub top_items: Vec<ScoredNews>,
    /// Human-readable fetch failure, present iff the source's pipeline failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SourceResult {
    /// A populated result for a source whose fetch succeeded.
    pub fn ok(source: impl Into<String>, total_found: usize, top_items: Vec<ScoredNews>) -> Self {
        Self {
            source: source.into(),
            total_found,
            top_items,
            error: None,
        }
    }

    /// A failed result carrying the rendered fetch error.
    pub fn failed(source: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            total_found: 0,
            top_items: Vec::new(),
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn candidate(link: &str) -> NewsCandidate {
        NewsCandidate {
            title: "Regulamentação das apostas avança".to_string(),
            link: link.to_string(),
            summary: "Texto segue para sanção".to_string(),
            published_at: NaiveDate::from_ymd_opt(2025, 6, 9),
        }
    }

    #[test]
    fn scored_news_flattens_candidate_fields() {
        let scored = ScoredNews::new(candidate("https://example.com/a"), 3);
        let json = serde_json::to_string(&scored).unwrap();
        assert!(json.contains(r#""title":"Regulamentação das apostas avança""#));
        assert!(json.contains(r#""link":"https://example.com/a""#));
        assert!(json.contains(r#""score":3"#));
        assert!(json.contains(r#""published_at":"2025-06-09""#));
    }

    #[test]
    fn source_result_omits_absent_error() {
        let ok = SourceResult::ok("BNLData", 12, vec![]);
        let json = serde_json::to_string(&ok).unwrap();
        assert!(!json.contains("error"));
        assert!(json.contains(r#""total_found":12"#));
    }

    #[test]
    fn failed_source_result_is_empty_with_error() {
        let failed = SourceResult::failed("GovFazenda", "request timed out");
        assert_eq!(failed.total_found, 0);
        assert!(failed.top_items.is_empty());
        let json = serde_json::to_string(&failed).unwrap();
        assert!(json.contains(r#""error":"request timed out""#));
    }

    #[test]
    fn null_published_at_round_trips() {
        let mut c = candidate("https://example.com/b");
        c.published_at = None;
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains(r#""published_at":null"#));
        let back: NewsCandidate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
