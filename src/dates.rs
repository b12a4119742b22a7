//! Date normalization for the heterogeneous formats the sources publish.
//!
//! The four sites disagree on everything: ISO timestamps in `datetime`
//! attributes, dotted `dd.mm.yy` markers inside category labels, slashed
//! `dd/mm/yyyy` strings next to icons. [`normalize`] folds all of them into
//! a [`NaiveDate`] so the same-day filter can compare one canonical value.
//!
//! Two-digit years are read as `20yy`, so `09.06.25` and `09/06/2025` name
//! the same day.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

// Prefix match so `2025-06-09T14:30:00-03:00` parses without caring about
// the time-of-day tail.
static ISO: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})").unwrap());
static DOTTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})\.(\d{1,2})\.(\d{4}|\d{2})$").unwrap());
static SLASHED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4}|\d{2})$").unwrap());

/// Fallback formats tried, in order, on strings no structured pattern matched.
const FREEFORM_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d",
    "%d-%m-%Y",
    "%d %B %Y",
    "%B %d, %Y",
];

/// Parse a raw date string into a canonical day, or `None` if no pattern fits.
///
/// Recognizes, in order: ISO `YYYY-MM-DD` (with or without a time suffix),
/// dotted `dd.mm.yy[yy]`, slashed `dd/mm/yy[yy]`, then RFC 3339 / RFC 2822
/// and a short list of common formats. Never panics on malformed input;
/// out-of-range components (month 13, day 40) come back as `None`.
pub fn normalize(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(c) = ISO.captures(s) {
        return ymd(&c[1], &c[2], &c[3]);
    }
    if let Some(c) = DOTTED.captures(s) {
        return dmy(&c[1], &c[2], &c[3]);
    }
    if let Some(c) = SLASHED.captures(s) {
        return dmy(&c[1], &c[2], &c[3]);
    }

    freeform(s)
}

/// Same calendar day as the injected reference?
///
/// The reference is passed in rather than read from the system clock here,
/// so adapters filter against one consistent "today" and tests can pin it.
pub fn is_today(date: NaiveDate, reference: NaiveDate) -> bool {
    date.day() == reference.day()
        && date.month() == reference.month()
        && date.year() == reference.year()
}

fn ymd(y: &str, m: &str, d: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, d.parse().ok()?)
}

fn dmy(d: &str, m: &str, y: &str) -> Option<NaiveDate> {
    let year: i32 = y.parse().ok()?;
    let year = if year < 100 { 2000 + year } else { year };
    NaiveDate::from_ymd_opt(year, m.parse().ok()?, d.parse().ok()?)
}

fn freeform(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.date_naive());
    }
    for fmt in FREEFORM_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}
