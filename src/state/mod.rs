//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `Phase`: where the crawl state machine currently is
//! - `MatchRecord` / `MatchKind`: keyword hits and the surface they came from
//! - `Category`: category sections used as fallback crawl targets
//! - `CrawlSession`: everything carried between ticks, including the status feed

mod phase;
mod records;
mod session;

// Re-export main types
pub use phase::{CrawlTarget, Phase};
pub use records::{truncate_context, Category, MatchKind, MatchRecord, MAX_CONTEXT_CHARS};
pub use session::{CrawlSession, StatusEntry, StatusTag, DEFAULT_PAGE_BUDGET};
