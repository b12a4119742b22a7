//! Error taxonomy for the aggregation pipeline.
//!
//! Three tiers with different blast radii:
//!
//! - [`ConfigError`]: the keyword file could not be loaded. Fatal; no
//!   digest is meaningful without a keyword set, so the whole run aborts.
//! - [`FetchError`]: one source's pipeline failed (transport, bad status,
//!   or a listing page whose structure no longer matches). Recorded on that
//!   source's result and isolated from every other source.
//! - Item-scoped problems (a card missing its title, an article page that
//!   404s) are not errors at all; they surface as skip reasons on the
//!   extraction side.

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single source's fetch pipeline.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error(transparent)]
    Page(#[from] ParseError),
}

impl FetchError {
    pub fn http(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Http {
            url: url.into(),
            source,
        }
    }
}

/// A listing page whose required structure is absent.
///
/// Raised only for page-scoped breakage (e.g. the card container selector
/// matches nothing, meaning the site changed its layout). Malformed
/// individual items never produce this.
#[derive(Debug, Error)]
#[error("unexpected markup at {url}: {detail}")]
pub struct ParseError {
    pub url: String,
    pub detail: String,
}

impl ParseError {
    pub fn new(url: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            detail: detail.into(),
        }
    }
}

/// Keyword configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read keyword file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("keyword file {path} is not a JSON array of strings: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
