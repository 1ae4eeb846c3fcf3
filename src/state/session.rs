//! Crawl session state
//!
//! A [`CrawlSession`] carries everything a crawl needs between ticks. Only
//! the controller mutates it; renderers and exporters read it through
//! [`crate::crawler::Controller::snapshot`].

use crate::crawler::Frontier;
use crate::state::phase::Phase;
use crate::state::records::{Category, MatchRecord};
use chrono::{DateTime, Utc};
use std::fmt;
use std::time::{Duration, Instant};

/// Pages a phase may process before falling back, by default
pub const DEFAULT_PAGE_BUDGET: u32 = 8;

/// Kind of event recorded in the status feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusTag {
    Started,
    Crawled,
    FetchFailed,
    Skipped,
    Match,
    Categories,
    CategoryError,
    Paused,
    Resumed,
    LimitReached,
    FrontierDrained,
    PhaseChange,
    Completed,
    Reset,
}

impl StatusTag {
    /// Short glyph shown in front of feed messages
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Started => "🚀",
            Self::Crawled => "✅",
            Self::FetchFailed => "❌",
            Self::Skipped => "🌐",
            Self::Match => "🎯",
            Self::Categories => "🗂️",
            Self::CategoryError => "⚠️",
            Self::Paused => "⏸️",
            Self::Resumed => "▶️",
            Self::LimitReached => "🛑",
            Self::FrontierDrained => "ℹ️",
            Self::PhaseChange => "🔄",
            Self::Completed => "🏁",
            Self::Reset => "⏹️",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::FetchFailed | Self::CategoryError)
    }
}

/// One status feed line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub tag: StatusTag,
    pub message: String,
}

impl fmt::Display for StatusEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tag.icon(), self.message)
    }
}

/// All state carried by one crawl
#[derive(Debug, Clone)]
pub struct CrawlSession {
    pub(crate) seed_url: Option<String>,
    pub(crate) main_host: String,
    pub(crate) frontier: Frontier,
    pub(crate) matches: Vec<MatchRecord>,
    pub(crate) categories: Vec<Category>,
    pub(crate) categories_scanned: bool,
    pub(crate) phase: Phase,
    pub(crate) pages_in_phase: u32,
    pub(crate) page_budget: u32,
    pub(crate) feed: Vec<StatusEntry>,
    pub(crate) started_at: Option<Instant>,
    pub(crate) started_at_utc: Option<DateTime<Utc>>,
}

impl Default for CrawlSession {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_BUDGET, crate::crawler::DEFAULT_MAX_DEPTH)
    }
}

impl CrawlSession {
    /// Creates an idle session
    pub fn new(page_budget: u32, max_depth: u8) -> Self {
        Self {
            seed_url: None,
            main_host: String::new(),
            frontier: Frontier::new(max_depth),
            matches: Vec::new(),
            categories: Vec::new(),
            categories_scanned: false,
            phase: Phase::Idle,
            pages_in_phase: 0,
            page_budget,
            feed: Vec::new(),
            started_at: None,
            started_at_utc: None,
        }
    }

    pub fn seed_url(&self) -> Option<&str> {
        self.seed_url.as_deref()
    }

    /// Site key (host plus explicit port) of the main domain
    pub fn main_host(&self) -> &str {
        &self.main_host
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Match records in the order they were found
    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    /// Categories in fallback order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase.is_running()
    }

    /// Entries processed in the current phase
    pub fn pages_in_phase(&self) -> u32 {
        self.pages_in_phase
    }

    pub fn page_budget(&self) -> u32 {
        self.page_budget
    }

    /// The whole append-only status feed
    pub fn feed(&self) -> &[StatusEntry] {
        &self.feed
    }

    /// The last `n` feed entries, oldest first
    pub fn recent_feed(&self, n: usize) -> &[StatusEntry] {
        let start = self.feed.len().saturating_sub(n);
        &self.feed[start..]
    }

    /// Time since the crawl was started
    pub fn elapsed(&self) -> Duration {
        self.started_at
            .map(|started| started.elapsed())
            .unwrap_or_default()
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at_utc
    }

    /// The category the current (or paused) phase targets
    pub fn current_category(&self) -> Option<&Category> {
        use crate::state::phase::CrawlTarget;
        match self.phase {
            Phase::CategoryCrawl(index) | Phase::Paused(CrawlTarget::Category(index)) => {
                self.categories.get(index)
            }
            _ => None,
        }
    }

    /// Appends a feed entry and mirrors it to the log
    pub(crate) fn record(&mut self, tag: StatusTag, message: impl Into<String>) {
        let message = message.into();
        if tag.is_failure() {
            tracing::warn!(tag = ?tag, "{}", message);
        } else {
            tracing::info!(tag = ?tag, "{}", message);
        }
        self.feed.push(StatusEntry { tag, message });
    }
}
