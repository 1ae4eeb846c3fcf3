//! Statistics for a crawl session
//!
//! This module condenses a [`CrawlSession`] into the handful of numbers a
//! host shows after every tick.

use crate::state::{CrawlSession, MatchKind, Phase};
use std::collections::HashMap;
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// Time since the crawl started
    pub elapsed: Duration,

    /// Distinct URLs processed (the visited set)
    pub pages_processed: usize,

    /// Entries waiting in the frontier
    pub queued: usize,

    /// Match records found
    pub matches: usize,

    /// Match count by surface
    pub matches_by_kind: HashMap<MatchKind, usize>,

    /// Categories discovered on the main domain
    pub categories: usize,

    pub phase: Phase,
}

impl CrawlStatistics {
    /// Computes statistics from a session snapshot
    pub fn from_session(session: &CrawlSession) -> Self {
        let mut matches_by_kind = HashMap::new();
        for record in session.matches() {
            *matches_by_kind.entry(record.kind).or_insert(0) += 1;
        }

        Self {
            elapsed: session.elapsed(),
            pages_processed: session.frontier().visited_count(),
            queued: session.frontier().len(),
            matches: session.matches().len(),
            matches_by_kind,
            categories: session.categories().len(),
            phase: session.phase(),
        }
    }

    /// Processed pages per second of elapsed time
    pub fn pages_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.pages_processed as f64 / secs
        } else {
            0.0
        }
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===");
    println!("  Phase: {}", stats.phase);
    println!("  Elapsed: {:.1}s", stats.elapsed.as_secs_f64());
    println!(
        "  Processed: {} ({:.2} pages/s)",
        stats.pages_processed,
        stats.pages_per_second()
    );
    println!("  Queued: {}", stats.queued);
    println!("  Matches: {}", stats.matches);
    println!("  Categories: {}", stats.categories);

    if !stats.matches_by_kind.is_empty() {
        let mut kinds: Vec<_> = stats.matches_by_kind.iter().collect();
        kinds.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.label().cmp(b.0.label())));

        println!();
        println!("Matches by Type:");
        for (kind, count) in kinds {
            println!("  {}: {}", kind, count);
        }
    }
}
