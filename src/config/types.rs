use serde::Deserialize;

/// Keywords searched for when the config does not name any
pub const DEFAULT_KEYWORDS: &[&str] = &["gowithguide", "go with guide", "go-with-guide", "87121"];

/// Category names that always lead the fallback order
pub const DEFAULT_PRIORITY_CATEGORIES: &[&str] = &["travel", "blog", "resources"];

/// Main configuration structure for Smart Inspector
///
/// Every section is optional; an empty file yields the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub categories: CategoryConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Pages processed per phase before falling back to the next one
    #[serde(rename = "max-pages-per-phase", default = "default_max_pages")]
    pub max_pages_per_phase: u32,

    /// Maximum number of external hops an enqueued link may carry
    #[serde(rename = "max-external-depth", default = "default_max_external_depth")]
    pub max_external_depth: u8,

    /// Whole-request timeout in seconds
    #[serde(rename = "request-timeout-secs", default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages_per_phase: default_max_pages(),
            max_external_depth: default_max_external_depth(),
            request_timeout_secs: default_timeout(),
        }
    }
}

/// Request identification
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Value sent in the User-Agent header
    #[serde(default = "default_user_agent")]
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: default_user_agent(),
        }
    }
}

/// Keyword matching configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MatcherConfig {
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,

    /// Minimum partial-ratio score (0-100) for an approximate hit
    #[serde(rename = "fuzzy-threshold", default = "default_threshold")]
    pub fuzzy_threshold: u8,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
            fuzzy_threshold: default_threshold(),
        }
    }
}

/// Category fallback configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryConfig {
    /// Canonical category names, crawled first and in this order
    #[serde(default = "default_priority")]
    pub priority: Vec<String>,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            priority: default_priority(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory CSV exports are written to
    #[serde(rename = "results-dir", default = "default_results_dir")]
    pub results_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
        }
    }
}

fn default_max_pages() -> u32 {
    8
}

fn default_max_external_depth() -> u8 {
    2
}

fn default_timeout() -> u64 {
    15
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

fn default_threshold() -> u8 {
    85
}

fn default_priority() -> Vec<String> {
    DEFAULT_PRIORITY_CATEGORIES
        .iter()
        .map(|c| c.to_string())
        .collect()
}

fn default_results_dir() -> String {
    ".".to_string()
}
