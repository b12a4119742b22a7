//! GovFazenda scraper (Secretaria de Prêmios e Apostas news section).
//!
//! The ministry's news listing is paginated; this adapter walks every page
//! through the "próximo" link, guarding against cycles with a visited-URL
//! set. Tiles carry title, teaser, and a `dd/mm/yyyy` date rendered next to
//! a calendar icon inside the same span.
//!
//! Date policy: strict. Tiles without a parseable date are skipped.

use crate::dates;
use crate::errors::{FetchError, ParseError};
use crate::models::NewsCandidate;
use crate::scrapers::{ItemOutcome, SkipReason, SourceAdapter, fetch_html, keep_candidates};
use async_trait::async_trait;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use tracing::{debug, info, instrument};
use url::Url;

const BASE_URL: &str = "https://www.gov.br";
const START_URL: &str = "https://www.gov.br/fazenda/pt-br/composicao/orgaos/secretaria-de-premios-e-apostas/copy_of_noticias";

static TILES: Lazy<Selector> = Lazy::new(|| Selector::parse("article.tileItem").unwrap());
static HEADLINE: Lazy<Selector> = Lazy::new(|| Selector::parse("h2.tileHeadline a").unwrap());
static SUMMARY: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p.tileBody span.description").unwrap());
static DATE_SPAN: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.summary-view-icon").unwrap());
static NEXT_PAGE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("ul.paginacao li a.proximo").unwrap());

// The span mixes icon text with the date; pick out the dd/mm/yyyy token.
static TILE_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{1,2}/\d{1,2}/\d{4})").unwrap());

pub struct GovFazenda {
    base: Url,
}

impl Default for GovFazenda {
    fn default() -> Self {
        Self {
            base: Url::parse(BASE_URL).unwrap(),
        }
    }
}

#[async_trait]
impl SourceAdapter for GovFazenda {
    fn name(&self) -> &'static str {
        "GovFazenda"
    }

    #[instrument(level = "info", skip_all, fields(source = self.name()))]
    async fn fetch(&self, today: NaiveDate) -> Result<Vec<NewsCandidate>, FetchError> {
        let mut outcomes = Vec::new();
        let mut visited = HashSet::new();
        let mut next = Some(START_URL.to_string());
        let mut first_page = true;

        while let Some(url) = next {
            if !visited.insert(url.clone()) {
                break;
            }
            let html = fetch_html(&url).await?;
            let page = parse_listing(&html, &self.base, today, &url, first_page)?;
            debug!(page = %url, tiles = page.outcomes.len(), "Parsed GovFazenda listing page");
            outcomes.extend(page.outcomes);
            next = page.next_page.filter(|n| !visited.contains(n));
            first_page = false;
        }

        let candidates = keep_candidates(outcomes, self.name());
        info!(
            pages = visited.len(),
            count = candidates.len(),
            "Extracted GovFazenda candidates"
        );
        Ok(candidates)
    }
}

/// One parsed listing page: its tile outcomes plus the resolved "próximo"
/// link, if any.
#[derive(Debug)]
pub struct ListingPage {
    pub outcomes: Vec<ItemOutcome>,
    pub next_page: Option<String>,
}

/// Parse one listing page.
///
/// An empty tile set on the first page means the layout changed and fails
/// the adapter; on later pages it just ends the walk.
pub fn parse_listing(
    html: &str,
    base: &Url,
    today: NaiveDate,
    page_url: &str,
    require_tiles: bool,
) -> Result<ListingPage, ParseError> {
    let document = Html::parse_document(html);
    let tiles: Vec<ElementRef> = document.select(&TILES).collect();
    if tiles.is_empty() && require_tiles {
        return Err(ParseError::new(page_url, "no article.tileItem tiles"));
    }

    let outcomes = tiles
        .into_iter()
        .map(|tile| extract_tile(tile, base, today))
        .collect();

    let next_page = document
        .select(&NEXT_PAGE)
        .next()
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| base.join(href).ok())
        .map(|u| u.to_string());

    Ok(ListingPage {
        outcomes,
        next_page,
    })
}

fn extract_tile(tile: ElementRef, base: &Url, today: NaiveDate) -> ItemOutcome {
    let Some(anchor) = tile.select(&HEADLINE).next() else {
        return ItemOutcome::Skipped(SkipReason::MissingTitle);
    };
    let title = anchor.text().collect::<String>().trim().to_string();
    if title.is_empty() {
        return ItemOutcome::Skipped(SkipReason::MissingTitle);
    }

    let Some(href) = anchor.value().attr("href") else {
        return ItemOutcome::Skipped(SkipReason::MissingLink);
    };
    let Ok(link) = base.join(href) else {
        return ItemOutcome::Skipped(SkipReason::UnresolvableLink);
    };

    let summary = tile
        .select(&SUMMARY)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let published_at = tile
        .select(&DATE_SPAN)
        .next()
        .map(|el| el.text().collect::<String>())
        .and_then(|text| {
            TILE_DATE
                .find(&text)
                .and_then(|m| dates::normalize(m.as_str()))
        });

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
