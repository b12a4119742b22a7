//! GamesBras scraper.
//!
//! The homepage lists headlines as `h2.tituloM` elements nested inside an
//! ancestor `<a>`, with no dates or teasers inline. Publication date and
//! summary live on the article pages, so this adapter runs in two phases:
//! index the homepage, then visit each article with bounded concurrency.
//! One unreachable article page drops that item only, never the batch.
//!
//! Date policy: strict. Articles without a parseable `datePublished` are
//! skipped.

use crate::dates;
use crate::errors::{FetchError, ParseError};
use crate::models::NewsCandidate;
use crate::scrapers::{ItemOutcome, SkipReason, SourceAdapter, fetch_html, keep_candidates};
use async_trait::async_trait;
use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use tracing::{info, instrument, warn};
use url::Url;

const HOME_URL: &str = "https://www.gamesbras.com/";

/// Concurrent article-page fetches per batch.
const ARTICLE_CONCURRENCY: usize = 4;

static HEADLINES: Lazy<Selector> = Lazy::new(|| Selector::parse("h2.tituloM").unwrap());
static DATE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"h6.fecha_interna[itemprop="datePublished"]"#).unwrap());
static DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"h3[itemprop="description"]"#).unwrap());
static BODY_PARAGRAPHS: Lazy<Selector> = Lazy::new(|| Selector::parse("div.nota p").unwrap());

/// One homepage headline, before its article page has been visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadlineOutcome {
    Found { title: String, link: Url },
    Skipped(SkipReason),
}

pub struct GamesBras {
    base: Url,
}

impl Default for GamesBras {
    fn default() -> Self {
        Self {
            base: Url::parse(HOME_URL).unwrap(),
        }
    }
}

#[async_trait]
impl SourceAdapter for GamesBras {
    fn name(&self) -> &'static str {
        "GamesBras"
    }

    #[instrument(level = "info", skip_all, fields(source = self.name()))]
    async fn fetch(&self, today: NaiveDate) -> Result<Vec<NewsCandidate>, FetchError> {
        let home_html = fetch_html(HOME_URL).await?;
        let headlines = parse_home(&home_html, &self.base)?;

        let mut outcomes = Vec::new();
        let mut to_visit = Vec::new();
        for headline in headlines {
            match headline {
                HeadlineOutcome::Found { title, link } => to_visit.push((title, link)),
                HeadlineOutcome::Skipped(reason) => outcomes.push(ItemOutcome::Skipped(reason)),
            }
        }
        info!(count = to_visit.len(), "Indexed GamesBras headlines");

        // Order-preserving bounded fan-out over the article pages.
        let visited: Vec<ItemOutcome> = stream::iter(to_visit)
            .map(|(title, link)| async move {
                match fetch_html(link.as_str()).await {
                    Ok(page) => extract_article(&page, title, link, today),
                    Err(e) => {
                        warn!(url = %link, error = %e, "GamesBras article fetch failed");
                        ItemOutcome::Skipped(SkipReason::ArticleUnavailable)
                    }
                }
            })
            .buffered(ARTICLE_CONCURRENCY)
            .collect()
            .await;
        outcomes.extend(visited);

        let candidates = keep_candidates(outcomes, self.name());
        info!(count = candidates.len(), "Extracted GamesBras candidates");
        Ok(candidates)
    }
}

/// Index the homepage headlines, resolving links and collapsing repeats so
/// no article page is visited twice.
pub fn parse_home(html: &str, base: &Url) -> Result<Vec<HeadlineOutcome>, ParseError> {
    let document = Html::parse_document(html);
    let heads: Vec<ElementRef> = document.select(&HEADLINES).collect();
    if heads.is_empty() {
        return Err(ParseError::new(HOME_URL, "no h2.tituloM headlines"));
    }

    let mut seen = HashSet::new();
    let mut outcomes = Vec::new();
    for h2 in heads {
        let title = h2.text().collect::<String>().trim().to_string();
        if title.is_empty() {
            outcomes.push(HeadlineOutcome::Skipped(SkipReason::MissingTitle));
            continue;
        }
        let Some(href) = ancestor_anchor(h2).and_then(|a| a.value().attr("href")) else {
            outcomes.push(HeadlineOutcome::Skipped(SkipReason::MissingLink));
            continue;
        };
        let Ok(link) = base.join(href) else {
            outcomes.push(HeadlineOutcome::Skipped(SkipReason::UnresolvableLink));
            continue;
        };
        if !seen.insert(link.to_string()) {
            outcomes.push(HeadlineOutcome::Skipped(SkipReason::DuplicateLink));
            continue;
        }
        outcomes.push(HeadlineOutcome::Found { title, link });
    }
    Ok(outcomes)
}

/// Pull date and summary from one article page and apply the same-day filter.
pub fn extract_article(html: &str, title: String, link: Url, today: NaiveDate) -> ItemOutcome {
    let document = Html::parse_document(html);

    let published_at = document
        .select(&DATE)
        .next()
        .and_then(|el| el.value().attr("content"))
        .and_then(dates::normalize);

    let mut summary = document
        .select(&DESCRIPTION)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();
    if summary.is_empty() {
        summary = document
            .select(&BODY_PARAGRAPHS)
            .map(|p| p.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
    }

    match published_at {
        None => ItemOutcome::Skipped(SkipReason::UnknownDate),
        Some(date) if !dates::is_today(date, today) => ItemOutcome::Skipped(SkipReason::NotToday),
        Some(date) => ItemOutcome::Kept(NewsCandidate {
            title,
            link: link.to_string(),
            summary,
            published_at: Some(date),
        }),
    }
}

fn ancestor_anchor(element: ElementRef) -> Option<ElementRef> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "a")
}
