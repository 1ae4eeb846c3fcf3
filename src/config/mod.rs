//! Configuration module for Smart Inspector
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional, so a crawl can also run from [`Config::default`].
//!
//! # Example
//!
//! ```no_run
//! use smart_inspector::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("inspector.toml")).unwrap();
//! println!("Searching for {} keywords", config.matcher.keywords.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CategoryConfig, Config, CrawlerConfig, MatcherConfig, OutputConfig, UserAgentConfig,
    DEFAULT_KEYWORDS, DEFAULT_PRIORITY_CATEGORIES,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};

pub use validation::validate;
