//! Frontier queue and visited set
//!
//! The frontier is a plain FIFO, which makes the traversal breadth-first.
//! Deduplication happens against the visited set only: a URL may sit in the
//! queue more than once if sibling pages link to it, but it is processed at
//! most once because dequeuing consults [`Frontier::mark_visited`].

use std::collections::{HashSet, VecDeque};

/// Deepest external-hop count an entry may carry by default
pub const DEFAULT_MAX_DEPTH: u8 = 2;

/// A URL waiting to be processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// Absolute URL
    pub url: String,

    /// Number of external-domain hops from the seed
    pub depth: u8,
}

/// FIFO queue of pending URLs plus the monotonic visited set
#[derive(Debug, Clone)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    visited: HashSet<String>,
    max_depth: u8,
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl Frontier {
    /// Creates an empty frontier that refuses entries deeper than `max_depth`
    pub fn new(max_depth: u8) -> Self {
        Self {
            queue: VecDeque::new(),
            visited: HashSet::new(),
            max_depth,
        }
    }

    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    /// Appends an entry; returns false (and does nothing) if it is too deep
    pub fn enqueue(&mut self, url: impl Into<String>, depth: u8) -> bool {
        if depth > self.max_depth {
            return false;
        }
        self.queue.push_back(FrontierEntry {
            url: url.into(),
            depth,
        });
        true
    }

    /// Removes the oldest entry
    pub fn dequeue(&mut self) -> Option<FrontierEntry> {
        self.queue.pop_front()
    }

    /// Records a URL as processed; returns false if it already was
    pub fn mark_visited(&mut self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of queued entries (duplicates included)
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Replaces the queue with a single depth-0 entry, keeping the visited set
    ///
    /// Used when a phase falls back to the next category.
    pub fn reset_to(&mut self, url: impl Into<String>) {
        self.queue.clear();
        self.queue.push_back(FrontierEntry {
            url: url.into(),
            depth: 0,
        });
    }

    /// Empties both the queue and the visited set
    pub fn clear(&mut self) {
        self.queue.clear();
        self.visited.clear();
    }

    /// Iterates over queued entries in dequeue order
    pub fn iter(&self) -> impl Iterator<Item = &FrontierEntry> {
        self.queue.iter()
    }
}
