//! Crawl controller: the tick-driven state machine
//!
//! The controller owns the [`CrawlSession`] and is the only thing that
//! mutates it. Each call to [`Controller::tick`] keeps processing frontier
//! entries until the session pauses on a match or the current phase ends:
//!
//! - MainDomain ends when its frontier drains or its page budget is spent,
//!   then falls back to the first discovered category (or completes)
//! - CategoryCrawl(i) ends the same way and falls back to category i + 1
//! - Any match pauses the session before the next entry is dequeued
//!
//! Nothing propagates out of a tick: fetch failures become feed entries and
//! the failing URL stays visited.

use crate::config::Config;
use crate::crawler::extractor::{extract_categories, extract_links, scan_matches};
use crate::crawler::fetcher::{FetchedPage, Fetcher};
use crate::crawler::frontier::FrontierEntry;
use crate::matcher::KeywordMatcher;
use crate::state::{Category, CrawlSession, CrawlTarget, Phase, StatusTag};
use crate::url::{is_external, normalize_seed, site_key};
use crate::InspectorError;
use chrono::Utc;
use std::time::Instant;
use url::Url;

/// Progress summary returned by every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Phase the session is in after the tick
    pub phase: Phase,

    /// Distinct URLs processed so far in the session
    pub pages_processed: usize,

    /// Entries processed in the current phase
    pub pages_in_phase: u32,

    /// Entries still waiting in the frontier
    pub queued: usize,

    /// Match records found so far
    pub matches: usize,
}

/// Why a phase stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PhaseEnd {
    Drained,
    LimitReached,
}

/// Drives one crawl session
pub struct Controller {
    config: Config,
    fetcher: Fetcher,
    matcher: KeywordMatcher,
    session: CrawlSession,
}

impl Controller {
    /// Creates a controller with its own HTTP client
    ///
    /// # Arguments
    ///
    /// * `config` - A validated configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Controller)` - Idle controller, ready for [`Controller::start`]
    /// * `Err(InspectorError)` - The HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, InspectorError> {
        let fetcher = Fetcher::new(&config)?;
        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Creates a controller around an existing fetcher
    pub fn with_fetcher(config: Config, fetcher: Fetcher) -> Self {
        let matcher = KeywordMatcher::from_config(&config.matcher);
        let session = Self::fresh_session(&config);
        Self {
            config,
            fetcher,
            matcher,
            session,
        }
    }

    fn fresh_session(config: &Config) -> CrawlSession {
        CrawlSession::new(
            config.crawler.max_pages_per_phase,
            config.crawler.max_external_depth,
        )
    }

    /// Read-only view of the session for renderers and exporters
    pub fn snapshot(&self) -> &CrawlSession {
        &self.session
    }

    /// Starts a new crawl from `seed`, discarding any existing session
    ///
    /// A seed without a scheme is crawled over https. A seed that still does
    /// not parse is reported in the feed and the session completes at once.
    pub fn start(&mut self, seed: &str) {
        let seed = normalize_seed(seed);

        self.session = Self::fresh_session(&self.config);
        self.session.seed_url = Some(seed.clone());
        self.session.started_at = Some(Instant::now());
        self.session.started_at_utc = Some(Utc::now());

        let parsed = Url::parse(&seed).map_err(|e| e.to_string()).and_then(|url| {
            site_key(&url)
                .map(|key| (url, key))
                .ok_or_else(|| "URL has no host".to_string())
        });

        match parsed {
            Ok((url, main_host)) => {
                tracing::debug!("Main site key: {}", main_host);
                self.session.main_host = main_host;
                self.session.frontier.enqueue(url.as_str(), 0);
                self.session.phase = Phase::MainDomain;
                self.session
                    .record(StatusTag::Started, format!("Starting crawl of {}", url));
            }
            Err(reason) => {
                self.session.phase = Phase::Completed;
                self.session.record(
                    StatusTag::Completed,
                    format!("Cannot crawl invalid URL {}: {}", seed, reason),
                );
            }
        }
    }

    /// Pauses a running crawl; returns false if nothing was running
    pub fn pause(&mut self) -> bool {
        let Some(target) = self.session.phase.target() else {
            return false;
        };
        self.session.phase = Phase::Paused(target);
        self.session.record(StatusTag::Paused, "Crawl paused by user.");
        true
    }

    /// Re-enters the interrupted phase; returns false if not paused
    pub fn resume(&mut self) -> bool {
        let Phase::Paused(target) = self.session.phase else {
            return false;
        };
        self.session.phase = target.into();
        let label = self.target_label(target);
        self.session
            .record(StatusTag::Resumed, format!("Resuming crawl of {}.", label));
        true
    }

    /// Discards all session state and returns to Idle
    pub fn reset(&mut self) {
        self.session = Self::fresh_session(&self.config);
        self.session.record(StatusTag::Reset, "Crawl reset.");
    }

    /// Runs the crawl until it pauses or the current phase ends
    ///
    /// Does nothing unless the session is in MainDomain or CategoryCrawl.
    pub async fn tick(&mut self) -> TickReport {
        let Some(target) = self.session.phase.target() else {
            return self.report();
        };

        loop {
            let Some(entry) = self.session.frontier.dequeue() else {
                self.end_phase(target, PhaseEnd::Drained);
                break;
            };

            self.process_entry(entry, target).await;
            self.session.pages_in_phase += 1;

            if !self.session.matches.is_empty() {
                self.session.phase = Phase::Paused(target);
                let message = format!(
                    "Found {} matches in {}! Pausing for review.",
                    self.session.matches.len(),
                    self.target_label(target)
                );
                self.session.record(StatusTag::Paused, message);
                break;
            }

            if self.session.frontier.is_empty() {
                self.end_phase(target, PhaseEnd::Drained);
                break;
            }

            if self.session.pages_in_phase >= self.session.page_budget {
                self.end_phase(target, PhaseEnd::LimitReached);
                break;
            }
        }

        self.report()
    }

    /// Current progress without doing any work
    pub fn report(&self) -> TickReport {
        TickReport {
            phase: self.session.phase,
            pages_processed: self.session.frontier.visited_count(),
            pages_in_phase: self.session.pages_in_phase,
            queued: self.session.frontier.len(),
            matches: self.session.matches.len(),
        }
    }

    async fn process_entry(&mut self, entry: FrontierEntry, target: CrawlTarget) {
        if !self.session.frontier.mark_visited(&entry.url) {
            self.session
                .record(StatusTag::Skipped, format!("Already crawled {}", entry.url));
            return;
        }

        let external = match Url::parse(&entry.url) {
            Ok(url) => is_external(&url, &self.session.main_host),
            Err(_) => true,
        };
        if external && entry.depth >= self.session.frontier.max_depth() {
            self.session.record(
                StatusTag::Skipped,
                format!(
                    "Skipping external URL at depth {}: {}",
                    entry.depth, entry.url
                ),
            );
            return;
        }

        match self.fetcher.fetch(&entry.url).await {
            Ok(page) => self.absorb_page(&entry, &page, target),
            Err(e) => {
                self.session
                    .record(StatusTag::FetchFailed, format!("Error fetching: {}", e));
            }
        }
    }

    /// Scans a fetched page and feeds its links and categories back in
    fn absorb_page(&mut self, entry: &FrontierEntry, page: &FetchedPage, target: CrawlTarget) {
        let Some(document) = page.document() else {
            self.session.record(
                StatusTag::Skipped,
                format!(
                    "Skipping non-HTML content at {} ({})",
                    page.final_url, page.content_type
                ),
            );
            return;
        };

        self.session.record(
            StatusTag::Crawled,
            format!(
                "Crawled: {} ({:.2}s)",
                page.final_url,
                page.elapsed.as_secs_f64()
            ),
        );

        for record in scan_matches(&document, &page.final_url, &self.matcher) {
            self.session.record(
                StatusTag::Match,
                format!("{} at {}: {}", record.kind, record.source_url, record.context),
            );
            self.session.matches.push(record);
        }

        let links = extract_links(
            &document,
            &page.final_url,
            entry.depth,
            &self.session.main_host,
            &self.session.frontier,
        );
        tracing::debug!("Queueing {} links from {}", links.len(), page.final_url);
        for link in links {
            self.session.frontier.enqueue(link.url, link.depth);
        }

        if target == CrawlTarget::MainDomain && !self.session.categories_scanned {
            self.session.categories_scanned = true;
            match extract_categories(&document, &page.final_url, &self.config.categories.priority)
            {
                Ok(categories) => {
                    if !categories.is_empty() {
                        let names: Vec<&str> =
                            categories.iter().map(|c| c.name.as_str()).collect();
                        let message = format!("Found categories: {}", names.join(", "));
                        self.session.record(StatusTag::Categories, message);
                    }
                    self.session.categories = categories;
                }
                Err(e) => {
                    self.session.record(
                        StatusTag::CategoryError,
                        format!("Error extracting categories: {}", e),
                    );
                }
            }
        }
    }

    /// Falls back to the next category, or completes the crawl
    ///
    /// Fallback only happens while nothing has matched; a phase that runs
    /// out after a resumed match completes the crawl instead.
    fn end_phase(&mut self, target: CrawlTarget, reason: PhaseEnd) {
        let label = self.target_label(target);
        match reason {
            PhaseEnd::Drained => self.session.record(
                StatusTag::FrontierDrained,
                format!("No more pages to crawl in {}.", label),
            ),
            PhaseEnd::LimitReached => self.session.record(
                StatusTag::LimitReached,
                format!(
                    "Reached max pages limit ({}) for {}.",
                    self.session.page_budget, label
                ),
            ),
        }

        if !self.session.matches.is_empty() {
            self.session.phase = Phase::Completed;
            let message = format!(
                "Crawl completed with {} matches.",
                self.session.matches.len()
            );
            self.session.record(StatusTag::Completed, message);
            return;
        }

        let next = match target {
            CrawlTarget::MainDomain => 0,
            CrawlTarget::Category(index) => index + 1,
        };

        match self.session.categories.get(next).cloned() {
            Some(category) => self.enter_category(next, category, &label),
            None => {
                self.session.phase = Phase::Completed;
                let message = if self.session.categories.is_empty() {
                    "No categories found. Crawl completed with no matches."
                } else {
                    "No more categories to crawl. Crawl completed with no matches."
                };
                self.session.record(StatusTag::Completed, message);
            }
        }
    }

    fn enter_category(&mut self, index: usize, category: Category, previous: &str) {
        self.session.frontier.reset_to(category.url.as_str());
        self.session.pages_in_phase = 0;
        self.session.phase = Phase::CategoryCrawl(index);
        self.session.record(
            StatusTag::PhaseChange,
            format!(
                "No matches found in {}. Moving to '{}' category.",
                previous, category.name
            ),
        );
    }

    fn target_label(&self, target: CrawlTarget) -> String {
        match target {
            CrawlTarget::MainDomain => "main domain".to_string(),
            CrawlTarget::Category(index) => match self.session.categories.get(index) {
                Some(category) => format!("'{}' category", category.name),
                None => format!("category #{}", index),
            },
        }
    }
}
