//! wikirace-engine: a hyperlink-path search engine over the live Wikipedia link graph
//!
//! Given a start and finish article, the engine expands the hyperlink graph
//! concurrently through a bounded fetcher and a shared link cache, and searches
//! it with one of several strategies (breadth-first, depth-limited
//! depth-first, uniform-cost, A*, or bidirectional breadth-first) to produce
//! a short path of articles from start to finish.

pub mod cache;
pub mod config;
pub mod fetcher;
pub mod frontier;
pub mod heuristic;
pub mod page;
pub mod search;
pub mod telemetry;

use thiserror::Error;

/// Errors surfaced to callers of the search engine.
///
/// Fetch failures are deliberately *not* part of this enum's externally
/// visible behavior: a page that fails to fetch contributes zero successors
/// to the search rather than aborting it (see [`fetcher::FetchOutcome`]).
/// Only failures that make answering the request impossible reach here.
#[derive(Debug, Error)]
pub enum WikiRaceError {
    #[error("search exceeded its time budget")]
    Timeout,

    #[error("no path found between the given pages")]
    NotFound,

    #[error("invalid input: {0}")]
    BadInput(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, WikiRaceError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

pub use config::EngineConfig;
pub use page::PageId;
pub use search::{SearchEngine, SearchOutcome, Strategy};
