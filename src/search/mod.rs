//! Search engine: dispatches a path-finding request to one of five
//! strategies, each expanding the hyperlink graph through the shared
//! fetcher, link cache, and frontier.

mod a_star;
mod bfs;
mod bidirectional;
mod dfs;
mod uniform_cost;

use crate::cache::{InMemoryLinkCache, LinkCache};
use crate::config::EngineConfig;
use crate::fetcher::{build_http_client, get_links};
use crate::heuristic::Similarity;
use crate::page::PageId;
use crate::telemetry::{MetricsSink, NullMetricsSink, SearchOutcomeKind, SearchRecord};
use crate::{Result, WikiRaceError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

/// Which strategy [`SearchEngine::find_path`] should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Bfs,
    Dfs,
    UniformCost,
    AStar,
    Bidirectional { informed: bool },
}

/// The result of a completed (or aborted) search.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Found {
        path: Vec<PageId>,
        discovered_count: usize,
        depth_reached: u32,
    },
    NotFound {
        discovered_count: usize,
        depth_reached: u32,
    },
    TimedOut {
        discovered_count: usize,
        depth_reached: u32,
    },
}

impl SearchOutcome {
    fn kind(&self) -> SearchOutcomeKind {
        match self {
            SearchOutcome::Found { .. } => SearchOutcomeKind::Found,
            SearchOutcome::NotFound { .. } => SearchOutcomeKind::NotFound,
            SearchOutcome::TimedOut { .. } => SearchOutcomeKind::Timeout,
        }
    }

    fn discovered_count(&self) -> usize {
        match self {
            SearchOutcome::Found {
                discovered_count, ..
            }
            | SearchOutcome::NotFound {
                discovered_count, ..
            }
            | SearchOutcome::TimedOut {
                discovered_count, ..
            } => *discovered_count,
        }
    }

    fn depth_reached(&self) -> u32 {
        match self {
            SearchOutcome::Found { depth_reached, .. }
            | SearchOutcome::NotFound { depth_reached, .. }
            | SearchOutcome::TimedOut { depth_reached, .. } => *depth_reached,
        }
    }
}

/// Per-search execution context shared by every strategy: the fetcher's
/// collaborators plus the deadline and caps for this one call.
pub(crate) struct SearchContext {
    pub client: reqwest::Client,
    pub cache: Arc<dyn LinkCache>,
    pub semaphore: Arc<Semaphore>,
    pub config: EngineConfig,
    pub deadline: Instant,
}

impl SearchContext {
    pub fn expired(&self) -> bool {
        Instant::now() >= self.deadline
    }

    /// Fetches `node`'s outgoing links. Callers are responsible for
    /// deduping against whatever visited/discovered set they maintain —
    /// this deliberately does not take a snapshot of that set, since with
    /// several fetches in flight concurrently a snapshot taken at dispatch
    /// time would be stale by the time the fetch completes.
    pub async fn expand(&self, node: &PageId) -> Vec<PageId> {
        let (links, _outcome) = get_links(
            &self.client,
            self.cache.as_ref(),
            &self.semaphore,
            node,
            &self.config.retry,
            &self.config.article_origin,
        )
        .await;
        links
    }
}

/// The long-lived, process-wide engine: one HTTP client, one link cache, one
/// concurrency semaphore, and one metrics sink, shared across every search.
/// Constructed once at startup and handed to every `find_path` call, rather
/// than reached for through ambient globals.
pub struct SearchEngine {
    client: reqwest::Client,
    cache: Arc<dyn LinkCache>,
    semaphore: Arc<Semaphore>,
    metrics: Arc<dyn MetricsSink>,
    config: EngineConfig,
}

impl SearchEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        let client = build_http_client(&config)?;
        let semaphore = Arc::new(Semaphore::new(config.concurrent_requests_limit));
        Ok(SearchEngine {
            client,
            cache: Arc::new(InMemoryLinkCache::new()),
            semaphore,
            metrics: Arc::new(NullMetricsSink),
            config,
        })
    }

    pub fn with_cache(mut self, cache: Arc<dyn LinkCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsSink>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Finds a hyperlink path from `start` to `finish` using `strategy`.
    ///
    /// `similarity` is required for `Strategy::AStar` and for
    /// `Strategy::Bidirectional { informed: true }`; omitting it for those
    /// strategies is a [`WikiRaceError::BadInput`], raised before any
    /// network activity and before a telemetry record is produced.
    pub async fn find_path(
        &self,
        start: PageId,
        finish: PageId,
        strategy: Strategy,
        similarity: Option<&dyn Similarity>,
    ) -> Result<SearchOutcome> {
        if matches!(strategy, Strategy::AStar)
            || matches!(strategy, Strategy::Bidirectional { informed: true })
        {
            if similarity.is_none() {
                return Err(WikiRaceError::BadInput(
                    "this strategy requires a similarity oracle".to_string(),
                ));
            }
        }

        let started_at = Instant::now();
        let ctx = SearchContext {
            client: self.client.clone(),
            cache: self.cache.clone(),
            semaphore: self.semaphore.clone(),
            config: self.config.clone(),
            deadline: started_at + Duration::from_secs(self.config.timeout_secs),
        };

        if start == finish {
            let outcome = SearchOutcome::Found {
                path: vec![start.clone()],
                discovered_count: 1,
                depth_reached: 0,
            };
            self.record(&start, &finish, started_at, &outcome);
            return Ok(outcome);
        }

        let outcome = match strategy {
            Strategy::Bfs => bfs::run(&ctx, start.clone(), finish.clone()).await,
            Strategy::Dfs => dfs::run(&ctx, start.clone(), finish.clone()).await,
            Strategy::UniformCost => uniform_cost::run(&ctx, start.clone(), finish.clone()).await,
            Strategy::AStar => {
                a_star::run(&ctx, start.clone(), finish.clone(), similarity.unwrap()).await
            }
            Strategy::Bidirectional { informed } => {
                let sim = if informed { similarity } else { None };
                bidirectional::run(&ctx, start.clone(), finish.clone(), sim).await
            }
        };

        self.record(&start, &finish, started_at, &outcome);
        Ok(outcome)
    }

    fn record(&self, start: &PageId, finish: &PageId, started_at: Instant, outcome: &SearchOutcome) {
        let record = SearchRecord {
            start: start.clone(),
            finish: finish.clone(),
            elapsed_seconds: started_at.elapsed().as_secs_f64(),
            discovered_count: outcome.discovered_count(),
            depth_reached: outcome.depth_reached(),
            outcome: outcome.kind(),
        };
        if let Err(err) = self.metrics.record(&record) {
            tracing::warn!(error = %err, "failed to record search telemetry");
        }
    }
}
