//! iGamingBrazil scraper.
//!
//! Single fetch of the "todas as notícias" listing. Each module block
//! carries the headline anchor and a `<time datetime="...">` element with an
//! ISO timestamp, so no per-article visits are needed. The listing shows no
//! teaser text; summaries are empty.
//!
//! Date policy: strict. A block without a parseable `datetime` is skipped.

use crate::dates;
use crate::errors::{FetchError, ParseError};
use crate::models::NewsCandidate;
use crate::scrapers::{ItemOutcome, SkipReason, SourceAdapter, fetch_html, keep_candidates};
use async_trait::async_trait;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{info, instrument};
use url::Url;

const LISTING_URL: &str = "https://igamingbrazil.com/todas-as-noticias/";

static MODULES: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.td-module-container.td-category-pos-image").unwrap());
static HEADLINE: Lazy<Selector> = Lazy::new(|| Selector::parse("h3.entry-title a").unwrap());
static DATE: Lazy<Selector> = Lazy::new(|| Selector::parse("time.entry-date").unwrap());

pub struct IgamingBrazil {
    base: Url,
}

impl Default for IgamingBrazil {
    fn default() -> Self {
        Self {
            base: Url::parse(LISTING_URL).unwrap(),
        }
    }
}

#[async_trait]
impl SourceAdapter for IgamingBrazil {
    fn name(&self) -> &'static str {
        "iGamingBrazil"
    }

    #[instrument(level = "info", skip_all, fields(source = self.name()))]
    async fn fetch(&self, today: NaiveDate) -> Result<Vec<NewsCandidate>, FetchError> {
        let html = fetch_html(LISTING_URL).await?;
        let outcomes = parse_listing(&html, &self.base, today)?;
        let candidates = keep_candidates(outcomes, self.name());
        info!(count = candidates.len(), "Extracted iGamingBrazil candidates");
        Ok(candidates)
    }
}

pub fn parse_listing(
    html: &str,
    base: &Url,
    today: NaiveDate,
) -> Result<Vec<ItemOutcome>, ParseError> {
    let document = Html::parse_document(html);
    let modules: Vec<ElementRef> = document.select(&MODULES).collect();
    if modules.is_empty() {
        return Err(ParseError::new(LISTING_URL, "no td-module-container blocks"));
    }

    Ok(modules
        .into_iter()
        .map(|module| extract_module(module, base, today))
        .collect())
}

fn extract_module(module: ElementRef, base: &Url, today: NaiveDate) -> ItemOutcome {
    let Some(anchor) = module.select(&HEADLINE).next() else {
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

    let published_at = module
        .select(&DATE)
        .next()
        .and_then(|time| time.value().attr("datetime"))
        .and_then(dates::normalize);

    match published_at {
        None => ItemOutcome::Skipped(SkipReason::UnknownDate),
        Some(date) if !dates::is_today(date, today) => {
            ItemOutcome::Skipped(SkipReason::NotToday)
        }
        Some(date) => ItemOutcome::Kept(NewsCandidate {
            title,
            link: link.to_string(),
            summary: String::new(),
            published_at: Some(date),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse(LISTING_URL).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 9).unwrap()
    }

    const LISTING_HTML: &str = r#"
        <div class="td-module-container td-category-pos-image">
          <h3 class="entry-title"><a href="https://igamingbrazil.com/n/hoje">Aposta regulamentada hoje</a></h3>
          <time class="entry-date" datetime="2025-06-09T08:30:00-03:00">9 de junho</time>
        </div>
        <div class="td-module-container td-category-pos-image">
          <h3 class="entry-title"><a href="https://igamingbrazil.com/n/ontem">Notícia de ontem</a></h3>
          <time class="entry-date" datetime="2025-06-08T20:00:00-03:00">8 de junho</time>
        </div>
        <div class="td-module-container td-category-pos-image">
          <h3 class="entry-title"><a href="https://igamingbrazil.com/n/sem-data">Sem datetime</a></h3>
          <time class="entry-date">algum dia</time>
        </div>
    "#;

    #[test]
    fn keeps_only_todays_modules() {
        let outcomes = parse_listing(LISTING_HTML, &base(), today()).unwrap();
        assert_eq!(outcomes.len(), 3);
        assert!(matches!(
            &outcomes[0],
            ItemOutcome::Kept(c)
                if c.link == "https://igamingbrazil.com/n/hoje"
                    && c.published_at == Some(today())
                    && c.summary.is_empty()
        ));
        assert_eq!(outcomes[1], ItemOutcome::Skipped(SkipReason::NotToday));
        assert_eq!(outcomes[2], ItemOutcome::Skipped(SkipReason::UnknownDate));
    }

    #[test]
    fn module_without_headline_anchor_is_skipped() {
        let html = r#"
            <div class="td-module-container td-category-pos-image">
              <time class="entry-date" datetime="2025-06-09">hoje</time>
            </div>
        "#;
        let outcomes = parse_listing(html, &base(), today()).unwrap();
        assert_eq!(outcomes[0], ItemOutcome::Skipped(SkipReason::MissingTitle));
    }

    #[test]
    fn empty_listing_is_a_page_error() {
        assert!(parse_listing("<html></html>", &base(), today()).is_err());
    }
}
