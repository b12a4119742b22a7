//! Fan-out over all source adapters and assembly of the digest.
//!
//! Every adapter runs as an independent future behind a join barrier: the
//! run waits for all of them and one source's failure never touches another.
//! A failed source yields a result with its error rendered human-readable;
//! a successful one is capped, scored, and ranked.

use crate::errors::ConfigError;
use crate::models::{ScoredNews, SourceResult};
use crate::ranking;
use crate::relevance::{self, KeywordSet, ScoreWeights};
use crate::scrapers::{
    SourceAdapter, bnldata::BnlData, gamesbras::GamesBras, govfazenda::GovFazenda,
    igamingbrazil::IgamingBrazil,
};
use chrono::{Local, NaiveDate};
use futures::future::join_all;
use std::path::Path;
use tracing::{error, info, instrument, warn};

/// Candidates taken per source before scoring, bounding per-run cost.
pub const SCORING_CAP: usize = 30;

/// The fixed source list, in display order.
pub fn default_sources() -> Vec<Box<dyn SourceAdapter>> {
    vec![
        Box::new(BnlData::default()),
        Box::new(IgamingBrazil::default()),
        Box::new(GamesBras::default()),
        Box::new(GovFazenda::default()),
    ]
}

/// Run every adapter and build one [`SourceResult`] per source, in input
/// order.
///
/// On success the source's first [`SCORING_CAP`] candidates are scored and
/// ranked while `total_found` keeps the full pre-cap count; on failure the
/// result carries the error message with zero totals. No retries.
pub async fn run(
    sources: &[Box<dyn SourceAdapter>],
    keywords: &KeywordSet,
    weights: ScoreWeights,
    today: NaiveDate,
) -> Vec<SourceResult> {
    let runs = sources.iter().map(|source| async move {
        match source.fetch(today).await {
            Ok(candidates) => {
                let total_found = candidates.len();
                let scored: Vec<ScoredNews> = candidates
                    .into_iter()
                    .take(SCORING_CAP)
                    .map(|c| {
                        let score = relevance::score_candidate(&c, keywords, weights);
                        ScoredNews::new(c, score)
                    })
                    .collect();
                let top_items = ranking::rank(scored);
                info!(
                    source = source.name(),
                    total_found,
                    relevant = top_items.len(),
                    "Source processed"
                );
                SourceResult::ok(source.name(), total_found, top_items)
            }
            Err(e) => {
                warn!(source = source.name(), error = %e, "Source fetch failed");
                SourceResult::failed(source.name(), e.to_string())
            }
        }
    });

    join_all(runs).await
}

/// Single entry point for a digest run.
///
/// Loads the keyword set (failure here aborts the whole run, since no digest is
/// meaningful without it), reads today's date from the local clock once, and
/// fans out over the configured sources.
#[instrument(level = "info", skip_all)]
pub async fn aggregate_news(
    keywords_path: &Path,
    weights: ScoreWeights,
) -> Result<Vec<SourceResult>, ConfigError> {
    let keywords = relevance::load_keywords(keywords_path).inspect_err(|e| {
        error!(error = %e, "Keyword configuration failed to load");
    })?;
    if keywords.is_empty() {
        warn!("Keyword set is empty; every source will report zero relevant items");
    }

    let today = Local::now().date_naive();
    let sources = default_sources();
    info!(sources = sources.len(), %today, "Starting aggregation run");

    Ok(run(&sources, &keywords, weights, today).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{FetchError, ParseError};
    use crate::models::NewsCandidate;
    use async_trait::async_trait;

    struct FixedSource {
        name: &'static str,
        candidates: Vec<NewsCandidate>,
    }

    #[async_trait]
    impl SourceAdapter for FixedSource {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn fetch(&self, _today: NaiveDate) -> Result<Vec<NewsCandidate>, FetchError> {
            Ok(self.candidates.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl SourceAdapter for FailingSource {
        fn name(&self) -> &'static str {
            "Failing"
        }

        async fn fetch(&self, _today: NaiveDate) -> Result<Vec<NewsCandidate>, FetchError> {
            Err(FetchError::Page(ParseError::new(
                "https://example.com/",
                "no cards",
            )))
        }
    }

    fn candidate(i: usize, title: &str) -> NewsCandidate {
        NewsCandidate {
            title: title.to_string(),
            link: format!("https://example.com/{i}"),
            summary: String::new(),
            published_at: None,
        }
    }

    fn relevant_candidates(n: usize) -> Vec<NewsCandidate> {
        (0..n).map(|i| candidate(i, "aposta do dia")).collect()
    }

    fn sources_with_failure_in_second() -> Vec<Box<dyn SourceAdapter>> {
        vec![
            Box::new(FixedSource {
                name: "A",
                candidates: relevant_candidates(3),
            }),
            Box::new(FailingSource),
            Box::new(FixedSource {
                name: "C",
                candidates: relevant_candidates(2),
            }),
            Box::new(FixedSource {
                name: "D",
                candidates: relevant_candidates(1),
            }),
        ]
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 9).unwrap()
    }

    #[tokio::test]
    async fn one_failing_source_leaves_the_others_untouched() {
        let sources = sources_with_failure_in_second();
        let keywords = KeywordSet::from_terms(["aposta"]);
        let results = run(&sources, &keywords, ScoreWeights::default(), today()).await;

        assert_eq!(results.len(), 4);
        let names: Vec<&str> = results.iter().map(|r| r.source.as_str()).collect();
        assert_eq!(names, vec!["A", "Failing", "C", "D"]);

        let failed = &results[1];
        assert!(failed.error.as_deref().unwrap().contains("no cards"));
        assert_eq!(failed.total_found, 0);
        assert!(failed.top_items.is_empty());

        assert_eq!(results[0].total_found, 3);
        assert_eq!(results[0].top_items.len(), 3);
        assert!(results[2].error.is_none());
        assert!(results[3].error.is_none());
    }

    #[tokio::test]
    async fn total_found_counts_before_the_scoring_cap() {
        let sources: Vec<Box<dyn SourceAdapter>> = vec![Box::new(FixedSource {
            name: "Big",
            candidates: relevant_candidates(45),
        })];
        let keywords = KeywordSet::from_terms(["aposta"]);
        let results = run(&sources, &keywords, ScoreWeights::default(), today()).await;

        assert_eq!(results[0].total_found, 45);
        // 30 candidates survive the cap, ranking keeps the top 10.
        assert_eq!(results[0].top_items.len(), 10);
    }

    #[tokio::test]
    async fn empty_keyword_set_empties_top_items_but_not_totals() {
        let sources: Vec<Box<dyn SourceAdapter>> = vec![Box::new(FixedSource {
            name: "A",
            candidates: relevant_candidates(5),
        })];
        let keywords = KeywordSet::from_terms(Vec::<String>::new());
        let results = run(&sources, &keywords, ScoreWeights::default(), today()).await;

        assert_eq!(results[0].total_found, 5);
        assert!(results[0].top_items.is_empty());
        assert!(results[0].error.is_none());
    }

    #[tokio::test]
    async fn irrelevant_candidates_rank_below_relevant_ones() {
        let sources: Vec<Box<dyn SourceAdapter>> = vec![Box::new(FixedSource {
            name: "Mix",
            candidates: vec![
                candidate(0, "previsão do tempo"),
                candidate(1, "nova aposta esportiva"),
            ],
        })];
        let keywords = KeywordSet::from_terms(["aposta"]);
        let results = run(&sources, &keywords, ScoreWeights::default(), today()).await;

        let items = &results[0].top_items;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].candidate.link, "https://example.com/1");
        assert_eq!(items[0].score, 2);
    }

    #[tokio::test]
    async fn aggregate_news_fails_fast_on_missing_keywords() {
        let err = aggregate_news(Path::new("/nonexistent/kw.json"), ScoreWeights::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
