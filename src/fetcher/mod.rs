//! Fetcher: turns a [`PageId`] into its outgoing article links, through the
//! link cache, a bounded-concurrency HTTP client, and a retry policy.

mod parser;

pub use parser::extract_article_links;

use crate::cache::LinkCache;
use crate::config::{EngineConfig, RetryConfig};
use crate::page::PageId;
use std::time::Duration;
use tokio::sync::Semaphore;
use url::Url;

/// How a single fetch attempt concluded, for retry classification and
/// telemetry. Neither variant is ever turned into a `WikiRaceError` — a
/// failed fetch simply yields zero successors for that node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Success,
    Transient,
    Terminal,
}

/// Builds the shared HTTP client used for every fetch, identifying this
/// engine with a descriptive User-Agent as Wikipedia's robots policy and
/// API etiquette expect.
pub fn build_http_client(config: &EngineConfig) -> reqwest::Result<reqwest::Client> {
    let ua = &config.user_agent;
    let user_agent = format!(
        "{}/{} (+{}; {})",
        ua.crawler_name, ua.crawler_version, ua.contact_url, ua.contact_email
    );

    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .https_only(true)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Exponential backoff, grounded in the same doubling shape used for every
/// other retry policy in this codebase's corpus: `base * 2^attempt`.
pub fn delay_for_attempt(retry: &RetryConfig, attempt: u32) -> Duration {
    let base = Duration::from_secs(retry.base_delay_secs);
    base.saturating_mul(2u32.saturating_pow(attempt))
}

/// Returns true if a failure at this stage is worth retrying: connection
/// failures, timeouts, and 5xx server errors are transient; 4xx client
/// errors are not.
fn is_retryable(status: Option<reqwest::StatusCode>, is_timeout: bool, is_connect: bool) -> bool {
    if is_timeout || is_connect {
        return true;
    }
    match status {
        Some(status) => status.is_server_error(),
        None => false,
    }
}

/// Fetches `page`'s outgoing article links: cache lookup, single-flight
/// fetch coordination, bounded concurrency, retrying HTTP fetch, HTML
/// parsing and link filtering, and cache population.
///
/// A failure that survives all retries yields `(vec![], FetchOutcome::..)`
/// rather than an error — the caller (the search engine) treats a failed
/// fetch as "this node has no discovered successors yet," per the
/// not-every-page-must-be-reachable semantics of the search strategies.
pub async fn get_links(
    client: &reqwest::Client,
    cache: &dyn LinkCache,
    semaphore: &Semaphore,
    page: &PageId,
    retry: &RetryConfig,
    origin: &str,
) -> (Vec<PageId>, FetchOutcome) {
    if let Some(links) = cache.get(page).await {
        return (links, FetchOutcome::Success);
    }

    if !cache.claim(page).await {
        let links = cache.wait_for(page).await.unwrap_or_default();
        return (links, FetchOutcome::Success);
    }

    let outcome = fetch_and_store(client, cache, semaphore, page, retry, origin).await;
    match outcome {
        Ok(links) => (links, FetchOutcome::Success),
        Err(classification) => {
            cache.fail(page).await;
            (Vec::new(), classification)
        }
    }
}

async fn fetch_and_store(
    client: &reqwest::Client,
    cache: &dyn LinkCache,
    semaphore: &Semaphore,
    page: &PageId,
    retry: &RetryConfig,
    origin: &str,
) -> Result<Vec<PageId>, FetchOutcome> {
    let url = Url::parse(page.as_str()).map_err(|_| FetchOutcome::Terminal)?;

    let mut last_outcome = FetchOutcome::Transient;
    for attempt in 0..=retry.max_retries {
        if attempt > 0 {
            tokio::time::sleep(delay_for_attempt(retry, attempt - 1)).await;
        }

        let _permit = semaphore
            .acquire()
            .await
            .expect("link cache semaphore should never be closed");

        tracing::debug!(url = %url, attempt, "fetching page");
        let response = client.get(url.clone()).send().await;

        let response = match response {
            Ok(response) => response,
            Err(err) => {
                last_outcome = if is_retryable(None, err.is_timeout(), err.is_connect()) {
                    FetchOutcome::Transient
                } else {
                    FetchOutcome::Terminal
                };
                if last_outcome == FetchOutcome::Terminal {
                    break;
                }
                continue;
            }
        };

        let status = response.status();
        if !status.is_success() {
            last_outcome = if is_retryable(Some(status), false, false) {
                FetchOutcome::Transient
            } else {
                FetchOutcome::Terminal
            };
            if last_outcome == FetchOutcome::Terminal {
                break;
            }
            continue;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(_) => {
                last_outcome = FetchOutcome::Transient;
                continue;
            }
        };

        let mut links = extract_article_links(&body, &url, origin);
        links.sort();
        links.dedup();
        cache
            .put(page.clone(), links.clone(), Duration::from_secs(3600))
            .await;
        tracing::debug!(url = %url, link_count = links.len(), "fetched page");
        return Ok(links);
    }

    tracing::warn!(url = %url, outcome = ?last_outcome, "fetch failed after retries");
    Err(last_outcome)
}
