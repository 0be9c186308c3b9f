//! Canonical identity for a Wikipedia article.
//!
//! A [`PageId`] wraps a canonicalized `<origin>/wiki/<Title>` URL. Two URLs
//! that denote the same article canonicalize to the same `PageId` and
//! compare equal, which is what lets the discovered-set and link-cache keys
//! be simple hash lookups.
//!
//! The article grammar's host is not baked into a `const`: production code
//! validates against [`DEFAULT_ARTICLE_ORIGIN`] (`en.wikipedia.org`), but
//! every constructor has an `_with_origin` counterpart that checks against
//! an arbitrary scheme+host+port instead — this is what lets tests point
//! the grammar at a `wiremock` server rather than the real site.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use url::Url;

use crate::WikiRaceError;

/// The production article origin: scheme + host that a [`PageId`]
/// canonicalizes against unless an explicit origin is supplied.
pub const DEFAULT_ARTICLE_ORIGIN: &str = "https://en.wikipedia.org";

/// Matches the article-path shape `/wiki/<Title>` with no namespace colon.
/// Fragment and query are stripped, and the host is checked separately
/// against the configured origin, so this only has to cover the path.
static ARTICLE_PATH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/wiki/[^:]+$").expect("valid regex"));

/// A canonicalized identifier for a Wikipedia article.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(String);

impl PageId {
    /// Parses a page identifier from either a bare title (`"Kevin Bacon"`,
    /// `"Kevin_Bacon"`) or a full article URL, validated against
    /// [`DEFAULT_ARTICLE_ORIGIN`].
    pub fn parse(input: &str) -> crate::Result<Self> {
        Self::parse_with_origin(input, DEFAULT_ARTICLE_ORIGIN)
    }

    /// Same as [`PageId::parse`], but validates the host against `origin`
    /// (a scheme+host[:port] string, e.g. a mock server's URI) instead of
    /// the default Wikipedia origin. Bare titles are resolved against
    /// `origin` too.
    pub fn parse_with_origin(input: &str, origin: &str) -> crate::Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(WikiRaceError::BadInput("page title is empty".into()));
        }

        let url = if input.starts_with("http://") || input.starts_with("https://") {
            Url::parse(input).map_err(WikiRaceError::UrlParse)?
        } else {
            let encoded = input.replace(' ', "_");
            let base = origin.trim_end_matches('/');
            Url::parse(&format!("{base}/wiki/{encoded}")).map_err(WikiRaceError::UrlParse)?
        };

        Self::from_url_with_origin(&url, origin)
    }

    /// Builds a `PageId` from an already-resolved [`Url`], applying the same
    /// article-grammar check as [`PageId::parse`] against
    /// [`DEFAULT_ARTICLE_ORIGIN`]. Used by the link extractor when resolving
    /// `href`s against a page's own URL.
    pub fn from_url(url: &Url) -> crate::Result<Self> {
        Self::from_url_with_origin(url, DEFAULT_ARTICLE_ORIGIN)
    }

    /// Same as [`PageId::from_url`], but validates against `origin` instead
    /// of the default Wikipedia origin.
    pub fn from_url_with_origin(url: &Url, origin: &str) -> crate::Result<Self> {
        let origin_url = Url::parse(origin).map_err(WikiRaceError::UrlParse)?;

        let mut canonical = url.clone();
        canonical.set_fragment(None);
        canonical.set_query(None);

        let canonical_str = canonical.as_str().trim_end_matches('/').to_string();

        if !matches_article_grammar(&canonical, &origin_url) {
            return Err(WikiRaceError::BadInput(format!(
                "'{canonical_str}' is not a canonical article URL under '{origin}'"
            )));
        }

        Ok(PageId(canonical_str))
    }

    /// Returns true if `url` is an in-scope article link under
    /// [`DEFAULT_ARTICLE_ORIGIN`], without constructing a `PageId` for it.
    /// Used as a cheap pre-filter in the hot link-extraction path.
    pub fn is_article_url(url: &Url) -> bool {
        Self::is_article_url_for(url, DEFAULT_ARTICLE_ORIGIN)
    }

    /// Same as [`PageId::is_article_url`], but checked against `origin`.
    pub fn is_article_url_for(url: &Url, origin: &str) -> bool {
        let origin_url = match Url::parse(origin) {
            Ok(origin_url) => origin_url,
            Err(_) => return false,
        };
        let mut canonical = url.clone();
        canonical.set_fragment(None);
        canonical.set_query(None);
        matches_article_grammar(&canonical, &origin_url)
    }

    /// The underlying canonical URL string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable article title: the last path segment with underscores
    /// turned back into spaces and percent-encoding undone.
    pub fn title(&self) -> String {
        let last_segment = self.0.rsplit('/').next().unwrap_or(&self.0);
        percent_decode(last_segment).replace('_', " ")
    }
}

fn matches_article_grammar(canonical: &Url, origin: &Url) -> bool {
    canonical.scheme() == origin.scheme()
        && canonical.host_str() == origin.host_str()
        && canonical.port_or_known_default() == origin.port_or_known_default()
        && ARTICLE_PATH_PATTERN.is_match(canonical.path().trim_end_matches('/'))
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

fn percent_decode(s: &str) -> String {
    percent_encoding::percent_decode_str(s)
        .decode_utf8()
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| s.to_string())
}
