//! Ranking policy applied to scored candidates.
//!
//! Zero-score items are dropped, the rest are sorted by descending score
//! (stable, so ties keep the source-listing order) and truncated to the
//! top ten.

use crate::models::ScoredNews;

/// Maximum number of items a source contributes to the digest.
pub const MAX_TOP_ITEMS: usize = 10;

/// Filter, sort, and truncate one source's scored candidates.
pub fn rank(scored: Vec<ScoredNews>) -> Vec<ScoredNews> {
    let mut relevant: Vec<ScoredNews> = scored.into_iter().filter(|s| s.score > 0).collect();
    // Vec::sort_by is stable; equal scores stay in listing order.
    relevant.sort_by(|a, b| b.score.cmp(&a.score));
    relevant.truncate(MAX_TOP_ITEMS);
    relevant
}
