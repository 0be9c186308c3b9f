//! wikirace-engine CLI
//!
//! Finds a hyperlink path between two Wikipedia articles and prints it.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use wikirace_engine::cache::{InMemoryLinkCache, SqliteLinkStore};
use wikirace_engine::config::load_config_or_default;
use wikirace_engine::heuristic::{LexicalOverlap, Similarity};
use wikirace_engine::telemetry::CsvMetricsSink;
use wikirace_engine::{PageId, SearchEngine, SearchOutcome, Strategy};

/// wikirace-engine: finds a hyperlink path between two Wikipedia articles
#[derive(Parser, Debug)]
#[command(name = "wikirace")]
#[command(version)]
#[command(about = "Finds a hyperlink path between two Wikipedia articles", long_about = None)]
struct Cli {
    /// Starting article title or URL
    start: String,

    /// Target article title or URL
    finish: String,

    /// Search strategy to use
    #[arg(short, long, value_enum, default_value_t = CliStrategy::Bidirectional)]
    strategy: CliStrategy,

    /// Path to a TOML configuration file; falls back to built-in defaults
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Append a CSV performance record for this search to the given file
    #[arg(long, value_name = "PATH")]
    metrics_out: Option<PathBuf>,

    /// Back the link cache with a SQLite database so it survives between runs
    #[arg(long, value_name = "PATH")]
    cache_db: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum CliStrategy {
    Bfs,
    Dfs,
    UniformCost,
    AStar,
    Bidirectional,
    BidirectionalInformed,
}

impl From<CliStrategy> for Strategy {
    fn from(value: CliStrategy) -> Self {
        match value {
            CliStrategy::Bfs => Strategy::Bfs,
            CliStrategy::Dfs => Strategy::Dfs,
            CliStrategy::UniformCost => Strategy::UniformCost,
            CliStrategy::AStar => Strategy::AStar,
            CliStrategy::Bidirectional => Strategy::Bidirectional { informed: false },
            CliStrategy::BidirectionalInformed => Strategy::Bidirectional { informed: true },
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!(path = ?cli.config, "loading configuration");
    let config = load_config_or_default(cli.config.as_deref())?;

    let mut engine = SearchEngine::new(config.clone())?;

    if let Some(db_path) = cli.cache_db.as_deref().or(config
        .cache_backend_path
        .as_deref()
        .map(std::path::Path::new))
    {
        tracing::info!(path = %db_path.display(), "backing link cache with sqlite");
        let store = SqliteLinkStore::open(db_path)?;
        engine = engine.with_cache(Arc::new(InMemoryLinkCache::with_store(Arc::new(store))));
    }

    if let Some(metrics_path) = cli.metrics_out {
        engine = engine.with_metrics(Arc::new(CsvMetricsSink::new(metrics_path)));
    }

    let start = PageId::parse(&cli.start)?;
    let finish = PageId::parse(&cli.finish)?;
    let strategy: Strategy = cli.strategy.into();

    let similarity: Option<&dyn Similarity> = match strategy {
        Strategy::AStar | Strategy::Bidirectional { informed: true } => Some(&LexicalOverlap),
        _ => None,
    };

    tracing::info!(?strategy, start = %start, finish = %finish, "starting search");
    let outcome = engine.find_path(start, finish, strategy, similarity).await?;

    print_outcome(&outcome);
    Ok(())
}

fn print_outcome(outcome: &SearchOutcome) {
    match outcome {
        SearchOutcome::Found {
            path,
            discovered_count,
            depth_reached,
        } => {
            println!("Found a path of {} hops:", path.len() - 1);
            for (i, page) in path.iter().enumerate() {
                println!("  {}. {}", i + 1, page.title());
            }
            println!(
                "({} pages discovered, depth reached {})",
                discovered_count, depth_reached
            );
        }
        SearchOutcome::NotFound {
            discovered_count,
            depth_reached,
        } => {
            println!(
                "No path found ({} pages discovered, depth reached {})",
                discovered_count, depth_reached
            );
        }
        SearchOutcome::TimedOut {
            discovered_count,
            depth_reached,
        } => {
            println!(
                "Search timed out ({} pages discovered, depth reached {})",
                discovered_count, depth_reached
            );
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wikirace_engine=info,warn"),
            1 => EnvFilter::new("wikirace_engine=debug,info"),
            2 => EnvFilter::new("wikirace_engine=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
