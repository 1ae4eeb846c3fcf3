//! Smart Inspector: a keyword-hunting site crawler
//!
//! This crate crawls a target site (plus a bounded ring of externally linked
//! pages) looking for a small set of keywords in URLs, page text, metadata,
//! image alt-text and CSS background images. When the main site turns up
//! nothing, the crawl falls back to the site's category sections one by one.
//!
//! The engine is tick-driven: a host calls [`crawler::Controller::tick`]
//! repeatedly and renders [`crawler::Controller::snapshot`] between ticks.

pub mod config;
pub mod crawler;
pub mod matcher;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Smart Inspector operations
#[derive(Debug, Error)]
pub enum InspectorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid keyword: {0}")]
    InvalidKeyword(String),
}

/// Reasons a single page fetch can fail
///
/// None of these are fatal to a crawl: the controller records them in the
/// status feed, marks the URL visited and moves on. No retries are attempted.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {message}")]
    Connection { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    BadStatus { url: String, status: u16 },

    #[error("Failed to read body of {url}: {message}")]
    Body { url: String, message: String },

    #[error("Request failed for {url}: {message}")]
    Request { url: String, message: String },
}

impl FetchError {
    /// The URL the failed request was made for
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url }
            | Self::Connection { url, .. }
            | Self::BadStatus { url, .. }
            | Self::Body { url, .. }
            | Self::Request { url, .. } => url,
        }
    }
}

/// Result type alias for Smart Inspector operations
pub type Result<T> = std::result::Result<T, InspectorError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Controller, Fetcher, TickReport};
pub use matcher::KeywordMatcher;
pub use state::{Category, CrawlSession, MatchKind, MatchRecord, Phase};
pub use url::{is_same_site, normalize_seed, site_key};
