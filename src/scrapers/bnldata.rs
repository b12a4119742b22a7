//! BNLData scraper.
//!
//! Two listing pages feed this adapter: the homepage highlight cards and the
//! "editorias" latest-news grid. Cards on both carry the publication day as
//! a trailing `I dd.mm.yy` marker inside the category label.
//!
//! Date policy: strict on the homepage (highlights rotate slowly, so only
//! items dated today are news), lenient on the editorias page (the grid is
//! already newest-first, so items are kept even when the marker is missing).

use crate::dates;
use crate::errors::{FetchError, ParseError};
use crate::models::NewsCandidate;
use crate::scrapers::{ItemOutcome, SkipReason, SourceAdapter, fetch_html, keep_candidates};
use async_trait::async_trait;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{info, instrument};
use url::Url;

const HOME_URL: &str = "https://bnldata.com.br/";
const EDITORIAS_URL: &str = "https://bnldata.com.br/editorias/";

static HOME_CARDS: Lazy<Selector> = Lazy::new(|| Selector::parse(".list-posts .card").unwrap());
static EDITORIA_CARDS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#cards-area article.card").unwrap());
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse(".card__title").unwrap());
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static SUMMARY: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());
static CATEGORY: Lazy<Selector> = Lazy::new(|| Selector::parse("small.card__category").unwrap());

// Category labels end in "I dd.mm.yy".
static DATE_MARK: Lazy<Regex> = Lazy::new(|| Regex::new(r"I\s*(\d{2}\.\d{2}\.\d{2})\s*$").unwrap());

pub struct BnlData {
    base: Url,
}

impl Default for BnlData {
    fn default() -> Self {
        Self {
            base: Url::parse(HOME_URL).unwrap(),
        }
    }
}

#[async_trait]
impl SourceAdapter for BnlData {
    fn name(&self) -> &'static str {
        "BNLData"
    }

    #[instrument(level = "info", skip_all, fields(source = self.name()))]
    async fn fetch(&self, today: NaiveDate) -> Result<Vec<NewsCandidate>, FetchError> {
        let home_html = fetch_html(HOME_URL).await?;
        let mut outcomes = parse_home(&home_html, &self.base, today)?;

        let editorias_html = fetch_html(EDITORIAS_URL).await?;
        outcomes.extend(parse_editorias(&editorias_html, &self.base)?);

        let candidates = keep_candidates(outcomes, self.name());
        info!(count = candidates.len(), "Extracted BNLData candidates");
        Ok(candidates)
    }
}

/// Homepage highlights. Strict: only cards dated today survive.
pub fn parse_home(
    html: &str,
    base: &Url,
    today: NaiveDate,
) -> Result<Vec<ItemOutcome>, ParseError> {
    let document = Html::parse_document(html);
    let cards: Vec<ElementRef> = document.select(&HOME_CARDS).collect();
    if cards.is_empty() {
        return Err(ParseError::new(HOME_URL, "no highlight cards in .list-posts"));
    }

    Ok(cards
        .into_iter()
        .map(|card| extract_card(card, base, Some(today)))
        .collect())
}

/// Editorias grid. Lenient: undated cards are kept with a null date.
pub fn parse_editorias(html: &str, base: &Url) -> Result<Vec<ItemOutcome>, ParseError> {
    let document = Html::parse_document(html);
    let cards: Vec<ElementRef> = document.select(&EDITORIA_CARDS).collect();
    if cards.is_empty() {
        return Err(ParseError::new(EDITORIAS_URL, "no article cards in #cards-area"));
    }

    Ok(cards
        .into_iter()
        .map(|card| extract_card(card, base, None))
        .collect())
}

/// Extract one card. `strict_today` carries the reference day when only
/// same-day items should be kept; `None` keeps everything.
fn extract_card(card: ElementRef, base: &Url, strict_today: Option<NaiveDate>) -> ItemOutcome {
    let title = match card.select(&TITLE).next() {
        Some(el) => el.text().collect::<String>().trim().to_string(),
        None => return ItemOutcome::Skipped(SkipReason::MissingTitle),
    };
    if title.is_empty() {
        return ItemOutcome::Skipped(SkipReason::MissingTitle);
    }

    let Some(href) = card
        .select(&ANCHOR)
        .next()
        .and_then(|a| a.value().attr("href"))
    else {
        return ItemOutcome::Skipped(SkipReason::MissingLink);
    };
    let Ok(link) = base.join(href) else {
        return ItemOutcome::Skipped(SkipReason::UnresolvableLink);
    };

    let summary = card
        .select(&SUMMARY)
        .next()
        .map(|p| p.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let published_at = card
        .select(&CATEGORY)
        .next()
        .map(|el| el.text().collect::<String>())
        .and_then(|label| {
            DATE_MARK
                .captures(label.trim())
                .and_then(|c| dates::normalize(&c[1]))
        });

    if let Some(today) = strict_today {
        match published_at {
            None => return ItemOutcome::Skipped(SkipReason::UnknownDate),
            Some(date) if !dates::is_today(date, today) => {
                return ItemOutcome::Skipped(SkipReason::NotToday);
            }
            Some(_) => {}
        }
    }

    ItemOutcome::Kept(NewsCandidate {
        title,
        link: link.to_string(),
        summary,
        published_at,
    })
}
