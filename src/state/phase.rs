/// Phase definitions for the crawl state machine
///
/// A session starts `Idle`, crawls the main domain, then falls back to the
/// discovered categories one at a time. A match pauses the session; running
/// out of fallbacks completes it.
use std::fmt;

/// What a running phase is crawling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlTarget {
    /// The site the seed URL belongs to
    MainDomain,

    /// The category at this index of the session's category list
    Category(usize),
}

/// Represents the current phase of a crawl session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// No crawl has been started, or the session was reset
    #[default]
    Idle,

    /// Crawling the main domain from the seed URL
    MainDomain,

    /// Crawling the category at this index
    CategoryCrawl(usize),

    /// Stopped for review; resuming re-enters the interrupted target
    Paused(CrawlTarget),

    /// Every phase ran out without a match; only reset/start leave this
    Completed,
}

impl Phase {
    /// Returns true while ticks do work (MainDomain or CategoryCrawl)
    pub fn is_running(&self) -> bool {
        matches!(self, Self::MainDomain | Self::CategoryCrawl(_))
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, Self::Paused(_))
    }

    /// Returns true once the session can make no further progress
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// The target being crawled, if the phase is running
    pub fn target(&self) -> Option<CrawlTarget> {
        match self {
            Self::MainDomain => Some(CrawlTarget::MainDomain),
            Self::CategoryCrawl(index) => Some(CrawlTarget::Category(*index)),
            _ => None,
        }
    }

    /// Short machine-friendly name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::MainDomain => "main_domain",
            Self::CategoryCrawl(_) => "category_crawl",
            Self::Paused(_) => "paused",
            Self::Completed => "completed",
        }
    }
}

impl From<CrawlTarget> for Phase {
    fn from(target: CrawlTarget) -> Self {
        match target {
            CrawlTarget::MainDomain => Self::MainDomain,
            CrawlTarget::Category(index) => Self::CategoryCrawl(index),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CategoryCrawl(index) => write!(f, "category_crawl({})", index),
            Self::Paused(CrawlTarget::MainDomain) => write!(f, "paused(main_domain)"),
            Self::Paused(CrawlTarget::Category(index)) => {
                write!(f, "paused(category_crawl({}))", index)
            }
            other => write!(f, "{}", other.as_str()),
        }
    }
}
