//! Keyword loading and relevance scoring.
//!
//! The keyword list lives in a JSON string array and is loaded once per run.
//! Scoring is a case-insensitive substring check of every keyword against a
//! candidate's title and summary: a title hit is worth more than a summary
//! hit, one hit per field per keyword, sums accumulated across keywords.

use crate::errors::ConfigError;
use crate::models::NewsCandidate;
use itertools::Itertools;
use std::path::Path;
use tracing::info;

/// An ordered set of lowercase search terms.
///
/// Order is the file order (first occurrence wins on duplicates); comparison
/// is always done in lowercase on both sides.
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    terms: Vec<String>,
}

impl KeywordSet {
    /// Build a set from raw terms: lowercased, blank entries dropped,
    /// duplicates collapsed to their first occurrence.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .unique()
            .collect();
        Self { terms }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Load the keyword set from a JSON file containing an array of strings.
///
/// A missing or malformed file is a [`ConfigError`]: it aborts the whole
/// run rather than degrading into an empty set, because an empty set would
/// silently score everything zero.
pub fn load_keywords(path: &Path) -> Result<KeywordSet, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let terms: Vec<String> = serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let set = KeywordSet::from_terms(terms);
    info!(path = %path.display(), keywords = set.len(), "Loaded keyword set");
    Ok(set)
}

/// Field weights applied per keyword hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreWeights {
    /// Added when a keyword occurs in the title.
    pub title: u32,
    /// Added when a keyword occurs in the summary.
    pub summary: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        // Headline mentions are the stronger relevance signal.
        Self {
            title: 2,
            summary: 1,
        }
    }
}

/// Compute the relevance score for one candidate.
///
/// For every keyword, one substring test against the lowercased title and
/// one against the lowercased summary; a keyword occurring in both fields
/// contributes both weights, repeat occurrences within a field do not.
pub fn score_candidate(
    candidate: &NewsCandidate,
    keywords: &KeywordSet,
    weights: ScoreWeights,
) -> u32 {
    let title = candidate.title.to_lowercase();
    let summary = candidate.summary.to_lowercase();

    let mut score = 0u32;
    for keyword in keywords.terms() {
        if title.contains(keyword.as_str()) {
            score += weights.title;
        }
        if summary.contains(keyword.as_str()) {
            score += weights.summary;
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(title: &str, summary: &str) -> NewsCandidate {
        NewsCandidate {
            title: title.to_string(),
            link: "https://x/1".to_string(),
            summary: summary.to_string(),
            published_at: None,
        }
    }

    #[test]
    fn title_and_summary_hits_accumulate() {
        let keywords = KeywordSet::from_terms(["aposta", "bet"]);
        let c = candidate("Nova aposta esportiva", "Sem bet mencionado");
        assert_eq!(score_candidate(&c, &keywords, ScoreWeights::default()), 3);
    }

    #[test]
    fn empty_keyword_set_scores_zero() {
        let keywords = KeywordSet::from_terms(Vec::<String>::new());
        let c = candidate("Aposta liberada", "apostas em alta");
        assert_eq!(score_candidate(&c, &keywords, ScoreWeights::default()), 0);
    }

    #[test]
    fn matching_is_case_insensitive_both_ways() {
        let keywords = KeywordSet::from_terms(["APOSTA"]);
        let c = candidate("nova Aposta esportiva", "");
        assert_eq!(score_candidate(&c, &keywords, ScoreWeights::default()), 2);
    }

    #[test]
    fn repeat_occurrences_in_one_field_count_once() {
        let keywords = KeywordSet::from_terms(["bet"]);
        let c = candidate("bet bet bet", "");
        assert_eq!(score_candidate(&c, &keywords, ScoreWeights::default()), 2);
    }

    #[test]
    fn title_hit_outweighs_summary_only_hit() {
        let keywords = KeywordSet::from_terms(["cassino"]);
        let weights = ScoreWeights::default();
        let in_title = candidate("Cassino online cresce", "");
        let in_summary = candidate("Setor cresce", "o cassino online avança");
        assert!(
            score_candidate(&in_title, &keywords, weights)
                > score_candidate(&in_summary, &keywords, weights)
        );
    }

    #[test]
    fn keyword_set_dedups_and_keeps_order() {
        let set = KeywordSet::from_terms(["Bet", "aposta", "bet", "  ", "Aposta"]);
        assert_eq!(set.terms(), &["bet".to_string(), "aposta".to_string()]);
    }

    #[test]
    fn load_keywords_rejects_missing_file() {
        let err = load_keywords(Path::new("/nonexistent/keywords.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn load_keywords_rejects_non_array_json() {
        let dir = std::env::temp_dir().join("betfinder-kw-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.json");
        std::fs::write(&path, r#"{"keywords": ["aposta"]}"#).unwrap();
        let err = load_keywords(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));
    }

    #[test]
    fn load_keywords_reads_string_array() {
        let dir = std::env::temp_dir().join("betfinder-kw-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("ok.json");
        std::fs::write(&path, r#"["Aposta", "bet", "cassino"]"#).unwrap();
        let set = load_keywords(&path).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.terms()[0], "aposta");
    }
}
