//! Configuration for the search engine.
//!
//! This module handles loading, parsing, and validating the TOML
//! configuration that controls fetch timeouts, retry behavior, depth/page
//! caps, and the HTTP User-Agent sent to Wikipedia.
//!
//! # Example
//!
//! ```no_run
//! use wikirace_engine::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Engine will stop after depth {}", config.max_depth);
//! ```

mod parser;
mod types;
mod validation;

pub use parser::{load_config, load_config_or_default};
pub use types::{EngineConfig, RetryConfig, UserAgentConfig};
pub use validation::validate;
