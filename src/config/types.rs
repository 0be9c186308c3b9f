use serde::Deserialize;

/// Top-level engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_depth")]
    pub max_depth: u32,

    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    #[serde(default = "default_concurrent_requests_limit")]
    pub concurrent_requests_limit: usize,

    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Scheme+host (and optional port) that the article grammar and link
    /// filter validate against. Defaults to the real Wikipedia origin;
    /// overridden in tests to point the engine at a `wiremock` server.
    #[serde(rename = "article-origin", default = "default_article_origin")]
    pub article_origin: String,

    /// Optional path to a SQLite database used as an out-of-process link
    /// cache backing store (see the `cache` module). `None` keeps the
    /// cache purely in-memory.
    #[serde(default)]
    pub cache_backend_path: Option<String>,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            timeout_secs: default_timeout_secs(),
            max_depth: default_max_depth(),
            max_pages: default_max_pages(),
            concurrent_requests_limit: default_concurrent_requests_limit(),
            cache_ttl_secs: default_cache_ttl_secs(),
            article_origin: default_article_origin(),
            cache_backend_path: None,
            retry: RetryConfig::default(),
            user_agent: UserAgentConfig::default(),
        }
    }
}

/// Retry/backoff behavior for a single page fetch.
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(rename = "base-delay-secs", default = "default_base_delay_secs")]
    pub base_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            max_retries: default_max_retries(),
            base_delay_secs: default_base_delay_secs(),
        }
    }
}

/// User agent identification sent with every HTTP request.
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,

    #[serde(rename = "contact-url", default = "default_contact_url")]
    pub contact_url: String,

    #[serde(rename = "contact-email", default = "default_contact_email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        UserAgentConfig {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            contact_url: default_contact_url(),
            contact_email: default_contact_email(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    20
}
fn default_max_depth() -> u32 {
    10
}
fn default_max_pages() -> usize {
    50_000
}
fn default_concurrent_requests_limit() -> usize {
    10
}
fn default_cache_ttl_secs() -> u64 {
    3600
}
fn default_article_origin() -> String {
    crate::page::DEFAULT_ARTICLE_ORIGIN.to_string()
}
fn default_max_retries() -> u32 {
    3
}
fn default_base_delay_secs() -> u64 {
    2
}
fn default_crawler_name() -> String {
    "wikirace-engine".to_string()
}
fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
fn default_contact_url() -> String {
    "https://en.wikipedia.org".to_string()
}
fn default_contact_email() -> String {
    "noreply@example.com".to_string()
}
